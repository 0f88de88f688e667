// src/noyau/negation.rs
//
// Résolution du moins unaire, AVANT groupement et segmentation.
//
// Règle : un '-' est unaire ssi le caractère non-blanc qui le précède est
// - absent (début d'expression)
// - une parenthèse ouvrante
// - un caractère pouvant terminer un symbole d'opérateur du ruleset
// - un autre moins unaire (les négations s'enchaînent : "--5" == 5)
//
// Le lookbehind porte sur le caractère BRUT (pas sur un jeton) : les espaces
// sont conservés ici, c'est la segmentation qui les consomme.

use super::regles::Ruleset;

/// Caractère de l'entrée après résolution des négations.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Car {
    Brut { c: char, position: usize },
    Negation { position: usize },
}

impl Car {
    pub fn position(&self) -> usize {
        match self {
            Car::Brut { position, .. } | Car::Negation { position } => *position,
        }
    }
}

#[derive(Clone, Copy)]
enum Precedent {
    Debut,
    Ouvrante,
    Negation,
    Autre(char),
}

/// Marque chaque '-' unaire par `Car::Negation` ; tout le reste passe tel quel.
pub fn resoudre_negations(texte: &str, ruleset: &Ruleset) -> Vec<Car> {
    let mut out = Vec::with_capacity(texte.len());
    let mut prec = Precedent::Debut;

    for (position, c) in texte.chars().enumerate() {
        if c.is_whitespace() {
            out.push(Car::Brut { c, position });
            continue;
        }

        if c == '-' {
            let unaire = match prec {
                Precedent::Debut | Precedent::Ouvrante | Precedent::Negation => true,
                Precedent::Autre(p) => ruleset.termine_operateur(p),
            };
            if unaire {
                out.push(Car::Negation { position });
                prec = Precedent::Negation;
                continue;
            }
        }

        prec = if c == '(' {
            Precedent::Ouvrante
        } else {
            Precedent::Autre(c)
        };
        out.push(Car::Brut { c, position });
    }

    out
}
