//! Tests scientifiques (campagne) : invariants + robustesse + limites contrôlées.
//!
//! But : trouver les limites sans faire chauffer la machine.
//! - budget temps global
//! - tailles bornées (profondeur, longueur)
//!
//! Notes :
//! - le repli d'un palier est TOUJOURS gauche -> droite, puissance comprise
//! - la profondeur de parenthèses est bornée par Options::profondeur_max ;
//!   la longueur d'une chaîne d'opérateurs ne l'est pas (évaluation itérative)

use std::thread;
use std::time::{Duration, Instant};

use super::erreurs::{ErreurDomaine, ErreurEval};
use super::eval::{eval_expression, eval_options};
use super::finalisation::Valeur;
use super::operations;
use super::options::{Options, PROFONDEUR_DEFAUT};
use super::regles::{FnBinaire, FnUnaire, Ruleset};

/// Retire les blancs, sauf entre deux caractères alphanumériques
/// ("tan pi" reste "tan pi", "7 / 3" devient "7/3").
fn compacter(expr: &str) -> String {
    let mut out = String::with_capacity(expr.len());
    let mut blanc = false;
    for c in expr.chars() {
        if c.is_whitespace() {
            blanc = true;
            continue;
        }
        if blanc && c.is_alphanumeric() && out.chars().last().is_some_and(char::is_alphanumeric) {
            out.push(' ');
        }
        blanc = false;
        out.push(c);
    }
    out
}

fn eval_ok(expr: &str, ruleset: &Ruleset) -> Valeur {
    eval_expression(expr, ruleset, 8).unwrap_or_else(|e| panic!("expr={expr:?} err={e}"))
}

/// Budget global anti-gel.
fn budget(start: Instant, max: Duration) {
    if start.elapsed() > max {
        panic!("budget temps dépassé: {:?}", max);
    }
}

const CORPUS: &[&str] = &[
    "1 + 2 * 3",
    "8 - 3 - 2",
    "2 ^ 3 ^ 2",
    "-5 + 3",
    "--5",
    "10 % 4 * 3",
    "(1 + 2) / (3 - 4)",
    "2 * -(3 - 5) ** 2",
    "sin(0) + cos(0)",
    "sin(cos(0))",
    "-cos(pi) * e",
    "tan pi - 7 / 3",
];

/* ------------------------ Invariants ------------------------ */

#[test]
fn sci_parentheses_englobantes() {
    let r = Ruleset::scientifique();
    for e in CORPUS {
        let v = eval_ok(e, &r);
        assert_eq!(eval_ok(&format!("({e})"), &r), v, "expr={e:?}");
        assert_eq!(eval_ok(&format!("((({e})))"), &r), v, "expr={e:?}");
    }
}

#[test]
fn sci_espaces_hors_litteraux() {
    let r = Ruleset::scientifique();
    for e in CORPUS {
        let v = eval_ok(e, &r);
        let compact = compacter(e);
        let aere = e.replace('(', "( ").replace(')', " )");
        let tabs = e.replace(' ', "\t  ");
        for variante in [&compact, &aere, &tabs] {
            assert_eq!(eval_ok(variante, &r), v, "expr={variante:?}");
        }
    }
}

#[test]
fn sci_compacter_garde_les_mots_separes() {
    assert_eq!(compacter("tan pi - 7 / 3"), "tan pi-7/3");
    assert_eq!(compacter("-cos(pi) * e"), "-cos(pi)*e");
    assert_eq!(compacter("2 * -(3 - 5) ** 2"), "2*-(3-5)**2");
}

#[test]
fn sci_espace_dans_un_litteral() {
    let r = Ruleset::standard();
    assert_eq!(eval_ok("12 + 3", &r), Valeur::Entier(15));
    assert_eq!(
        eval_expression("1 2 + 3", &r, 8),
        Err(ErreurEval::OperandesAdjacentes { position: 2 })
    );
    assert!(matches!(
        eval_expression("1.5 0", &r, 8),
        Err(ErreurEval::OperandesAdjacentes { .. })
    ));
}

#[test]
fn sci_repli_gauche_droite() {
    let r = Ruleset::standard();
    assert_eq!(eval_ok("8 - 3 - 2", &r), Valeur::Entier(3));
    assert_eq!(eval_ok("100 / 10 / 5", &r), Valeur::Entier(2));
    assert_eq!(eval_ok("2 ^ 3 ^ 2", &r), Valeur::Entier(64));
    assert_eq!(eval_ok("2 ^ (3 ^ 2)", &r), Valeur::Entier(512));
    assert_eq!(eval_ok("7 % 4 * 2", &r), Valeur::Entier(6));
}

#[test]
fn sci_semantique_arithmetique() {
    let r = Ruleset::standard();
    assert_eq!(eval_ok("-7 % 3", &r), Valeur::Entier(2));
    assert_eq!(eval_ok("7 % -3", &r), Valeur::Entier(-2));
    assert_eq!(eval_ok("2 ^ -1", &r), Valeur::Flottant(0.5));
    assert_eq!(eval_ok("(-8) ^ 2", &r), Valeur::Entier(64));
    assert!(eval_expression("0 ^ -1", &r, 8).is_err());
    assert!(eval_expression("5 % 0", &r, 8).is_err());
    assert!(eval_expression("10 ^ 400", &r, 8).is_err());
}

/* ------------------------ Ruleset partagé ------------------------ */

#[test]
fn sci_ruleset_partage_entre_threads() {
    let r = Ruleset::scientifique();
    let attendus: Vec<Valeur> = CORPUS.iter().map(|e| eval_ok(e, &r)).collect();

    thread::scope(|s| {
        for k in 0..4 {
            let r = &r;
            let attendus = &attendus;
            s.spawn(move || {
                for tour in 0..50 {
                    // ordre différent par thread
                    let i = (tour * 7 + k) % CORPUS.len();
                    assert_eq!(eval_ok(CORPUS[i], r), attendus[i]);
                }
            });
        }
    });
}

#[test]
fn sci_ruleset_personnalise() {
    fn double(x: f64) -> Result<f64, ErreurDomaine> {
        Ok(2.0 * x)
    }

    // addition plus forte que la multiplication : paliers inversés
    let r = Ruleset::build(
        vec![
            vec![("+", operations::add as FnBinaire)],
            vec![("*", operations::mul as FnBinaire)],
        ],
        vec![("double", double as FnUnaire)],
        vec![("dix", 10.0)],
    )
    .unwrap_or_else(|e| panic!("ruleset: {e}"));

    assert_eq!(eval_ok("1 + 2 * 3", &r), Valeur::Entier(9));
    assert_eq!(eval_ok("double dix + 1", &r), Valeur::Entier(21));
    // '-' n'est pas un opérateur de ce ruleset
    assert_eq!(
        eval_expression("4 - 1", &r, 8),
        Err(ErreurEval::JetonInconnu {
            jeton: "-".into(),
            position: 2
        })
    );
}

/* ------------------------ Stress contrôlé (sans brûler) ------------------------ */

#[test]
fn sci_stress_profondeur_bornee() {
    let t0 = Instant::now();
    let max = Duration::from_millis(300);
    let r = Ruleset::standard();

    let n = PROFONDEUR_DEFAUT;
    let ok = format!("{}1{}", "(".repeat(n), ")".repeat(n));
    assert_eq!(eval_ok(&ok, &r), Valeur::Entier(1));
    budget(t0, max);

    let trop = format!("{}1{}", "(".repeat(n + 1), ")".repeat(n + 1));
    assert_eq!(
        eval_expression(&trop, &r, 8),
        Err(ErreurEval::ProfondeurExcessive { max: n })
    );

    // adversaire : des milliers de '(' sans fin, refusées sans tout parcourir
    let adverse = "(".repeat(100_000);
    assert!(matches!(
        eval_options(&adverse, &r, &Options::default()),
        Err(ErreurEval::ProfondeurExcessive { .. })
    ));
    budget(t0, max);
}

#[test]
fn sci_stress_longue_chaine() {
    let t0 = Instant::now();
    let max = Duration::from_secs(5);
    let r = Ruleset::standard();

    // chaîne plate : aucune profondeur de parenthèses, arbre très penché
    let mut expr = String::from("0");
    for k in 0..100_000 {
        expr.push_str(if k % 2 == 0 { " + 3" } else { " - 1" });
    }
    budget(t0, max);

    // 50 000 * 3 - 50 000 * 1
    assert_eq!(eval_ok(&expr, &r), Valeur::Entier(100_000));
    budget(t0, max);
}

#[test]
fn sci_stress_negations_enchainees() {
    let r = Ruleset::standard();
    let pair = format!("{}5", "-".repeat(200_000));
    let impair = format!("{}5", "-".repeat(200_001));
    assert_eq!(eval_ok(&pair, &r), Valeur::Entier(5));
    assert_eq!(eval_ok(&impair, &r), Valeur::Entier(-5));
}
