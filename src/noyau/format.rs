// src/noyau/format.rs
//
// Affichage de la démarche : jetons classés et arbre construit.
// Sortie volontairement explicite : chaque opération binaire est parenthésée,
// on voit donc directement l'ordre de repli choisi.

use super::expr::Expr;
use super::jetons::Jeton;

/* ------------------------ Jetons ------------------------ */

/// Jetons séparés par des espaces ; sous-groupes entre parenthèses,
/// négation affichée "neg" (pour la distinguer de la soustraction).
pub fn format_jetons(jetons: &[Jeton]) -> String {
    let mut out = Vec::new();
    for j in jetons {
        let s = match j {
            Jeton::Nombre { texte, .. } => texte.clone(),
            Jeton::Identifiant { nom, .. } => nom.clone(),
            Jeton::Operateur { symbole, .. } => symbole.clone(),
            Jeton::Negation { .. } => "neg".to_string(),
            Jeton::Groupe { jetons, .. } if jetons.is_empty() => "( )".to_string(),
            Jeton::Groupe { jetons, .. } => format!("( {} )", format_jetons(jetons)),
        };
        out.push(s);
    }
    out.join(" ")
}

/* ------------------------ Arbre ------------------------ */

enum Morceau<'a> {
    Expr(&'a Expr),
    Texte(String),
}

/// Forme entièrement parenthésée : (a op b), -x, f(x).
/// Parcours itératif, comme l'évaluation.
pub fn format_arbre(e: &Expr) -> String {
    use Expr::*;

    let mut out = String::new();
    let mut pile = vec![Morceau::Expr(e)];

    while let Some(m) = pile.pop() {
        match m {
            Morceau::Texte(t) => out.push_str(&t),

            Morceau::Expr(Nombre(v)) => out.push_str(&format!("{v}")),
            Morceau::Expr(Constante { nom, .. }) => out.push_str(nom),

            Morceau::Expr(Negation(x)) => {
                out.push('-');
                pile.push(Morceau::Expr(x));
            }

            // l'argument binaire porte déjà ses parenthèses
            Morceau::Expr(Fonction { nom, arg, .. }) => {
                out.push_str(nom);
                if matches!(**arg, Binaire { .. }) {
                    pile.push(Morceau::Expr(arg));
                } else {
                    out.push('(');
                    pile.push(Morceau::Texte(")".into()));
                    pile.push(Morceau::Expr(arg));
                }
            }

            Morceau::Expr(Binaire {
                symbole,
                gauche,
                droite,
                ..
            }) => {
                out.push('(');
                pile.push(Morceau::Texte(")".into()));
                pile.push(Morceau::Expr(droite));
                pile.push(Morceau::Texte(format!(" {symbole} ")));
                pile.push(Morceau::Expr(gauche));
            }
        }
    }

    out
}
