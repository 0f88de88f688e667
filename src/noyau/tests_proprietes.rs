//! Propriétés (proptest) sur des expressions générées.

use proptest::prelude::*;

use super::eval::{eval_expression, meval};
use super::finalisation::{finaliser, Valeur};
use super::regles::Ruleset;

/// Expression `+ - * /` sur des entiers, en jetons séparés.
fn jetons_strategy() -> impl Strategy<Value = Vec<String>> {
    let terme = (1i32..=50).prop_map(|n| n.to_string());
    let op = prop::sample::select(vec!["+", "-", "*", "/"]);

    (terme.clone(), prop::collection::vec((op, terme), 0..12)).prop_map(|(premier, suite)| {
        let mut v = vec![premier];
        for (op, t) in suite {
            v.push(op.to_string());
            v.push(t);
        }
        v
    })
}

fn texte(jetons: &[String], seps: &[&str]) -> String {
    let mut out = String::new();
    for (i, j) in jetons.iter().enumerate() {
        if i > 0 {
            out.push_str(seps[i % seps.len()]);
        }
        out.push_str(j);
    }
    out
}

proptest! {
    #[test]
    fn parentheses_englobantes_sans_effet(jetons in jetons_strategy()) {
        let e = texte(&jetons, &[" "]);
        let r = Ruleset::standard();
        prop_assert_eq!(
            eval_expression(&e, &r, 8),
            eval_expression(&format!("({e})"), &r, 8)
        );
    }

    #[test]
    fn espaces_sans_effet(
        jetons in jetons_strategy(),
        seps in prop::collection::vec(prop::sample::select(vec!["", " ", "  ", "\t"]), 1..6),
    ) {
        let r = Ruleset::standard();
        let compact = texte(&jetons, &[""]);
        let aere = texte(&jetons, &seps);
        prop_assert_eq!(eval_expression(&compact, &r, 8), eval_expression(&aere, &r, 8));
    }

    #[test]
    fn soustractions_repliees_a_gauche(termes in prop::collection::vec(-1000i64..1000, 1..20)) {
        let e = termes
            .iter()
            .map(|t| t.to_string())
            .collect::<Vec<_>>()
            .join(" - ");
        let attendu = termes[1..].iter().fold(termes[0], |acc, t| acc - t);
        prop_assert_eq!(meval(&e, None), Ok(Valeur::Entier(attendu)));
    }

    #[test]
    fn negations_en_chaine(n in 0usize..40, x in 0u32..10_000) {
        let e = format!("{}{x}", "-".repeat(n));
        let attendu = if n % 2 == 0 { x as f64 } else { -(x as f64) };
        prop_assert_eq!(meval(&e, None), Ok(finaliser(attendu, 8)));
    }

    #[test]
    fn entree_arbitraire_sans_panique(s in "[0-9a-z+*/^%() .-]{0,24}") {
        // Ok ou erreur typée : jamais de panique
        let _ = meval(&s, Some(&Ruleset::scientifique()));
    }
}
