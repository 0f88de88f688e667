//! Noyau : évaluation (pipeline réel)
//!
//! négations -> groupes -> jetons -> Expr (repli par paliers) -> valeur -> finalisation
//!
//! Toute erreur de structure sort avant le premier calcul : une expression mal
//! formée n'est jamais évaluée partiellement.

use log::debug;

use super::arbre::construire;
use super::erreurs::ErreurEval;
use super::expr::Expr;
use super::finalisation::{finaliser, Valeur};
use super::format::{format_arbre, format_jetons};
use super::groupement::grouper;
use super::jetons::{classer, Jeton};
use super::negation::resoudre_negations;
use super::options::Options;
use super::regles::Ruleset;

#[derive(Default, Clone, Debug)]
pub struct DemarcheNoyau {
    pub jetons: String,
    pub arbre: String,
    pub brut: f64,
    pub note: String,
}

fn jetons_de(
    expr_str: &str,
    ruleset: &Ruleset,
    options: &Options,
) -> Result<Vec<Jeton>, ErreurEval> {
    if expr_str.trim().is_empty() {
        return Err(ErreurEval::ExpressionVide);
    }

    let cars = resoudre_negations(expr_str, ruleset);
    let racine = grouper(&cars, options.profondeur_max)?;
    let jetons = classer(&racine, ruleset)?;
    debug!("jetons : {}", format_jetons(&jetons));
    Ok(jetons)
}

/// Analyse seule : construit l'arbre sans rien calculer.
pub fn analyse(expr_str: &str, ruleset: &Ruleset, options: &Options) -> Result<Expr, ErreurEval> {
    let jetons = jetons_de(expr_str, ruleset, options)?;
    construire(&jetons, ruleset)
}

/// Évaluation complète avec options explicites.
pub fn eval_options(
    expr_str: &str,
    ruleset: &Ruleset,
    options: &Options,
) -> Result<Valeur, ErreurEval> {
    let arbre = analyse(expr_str, ruleset, options)?;
    let brut = arbre.evaluer()?;
    debug!("{expr_str:?} -> {brut}");
    Ok(finaliser(brut, options.chiffres))
}

/// API publique : évalue une expression, arrondie à `chiffres` décimales
/// (<= 0 : pas d'arrondi), puis ramenée à un entier si elle en est un.
pub fn eval_expression(
    expr_str: &str,
    ruleset: &Ruleset,
    chiffres: i32,
) -> Result<Valeur, ErreurEval> {
    eval_options(expr_str, ruleset, &Options::new(chiffres))
}

/// Comme `eval_options`, avec la démarche (jetons, arbre, valeur brute).
pub fn eval_detaille(
    expr_str: &str,
    ruleset: &Ruleset,
    options: &Options,
) -> Result<(Valeur, DemarcheNoyau), ErreurEval> {
    let jetons = jetons_de(expr_str, ruleset, options)?;
    let arbre = construire(&jetons, ruleset)?;
    let brut = arbre.evaluer()?;

    let d = DemarcheNoyau {
        jetons: format_jetons(&jetons),
        arbre: format_arbre(&arbre),
        brut,
        note: format!(
            "Pipeline: négations → groupes → jetons → arbre ({} paliers, gauche à droite) → valeur → arrondi ({} chiffres).",
            ruleset.nb_paliers(),
            options.chiffres
        ),
    };

    Ok((finaliser(brut, options.chiffres), d))
}

/// Raccourci : ruleset standard si aucun n'est donné, options par défaut.
pub fn meval(expr_str: &str, ruleset: Option<&Ruleset>) -> Result<Valeur, ErreurEval> {
    match ruleset {
        Some(r) => eval_options(expr_str, r, &Options::default()),
        None => eval_options(expr_str, &Ruleset::standard(), &Options::default()),
    }
}
