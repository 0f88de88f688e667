//! Noyau : évaluateur infixe à paliers
//!
//! Organisation interne :
//! - regles.rs       : ruleset (paliers d'opérateurs, fonctions, constantes)
//! - operations.rs   : fonctions numériques des rulesets fournis
//! - negation.rs     : résolution du moins unaire
//! - groupement.rs   : arbre de parenthèses (profondeur bornée)
//! - jetons.rs       : segmentation + classification
//! - arbre.rs        : construction de l'Expr (repli par paliers)
//! - expr.rs         : AST + évaluation itérative
//! - finalisation.rs : arrondi + coercition entière
//! - format.rs       : affichage de la démarche
//! - eval.rs         : pipeline complet

pub mod arbre;
pub mod erreurs;
pub mod eval;
pub mod expr;
pub mod finalisation;
pub mod format;
pub mod groupement;
pub mod jetons;
pub mod negation;
pub mod operations;
pub mod options;
pub mod regles;

#[cfg(test)]
mod tests_scientifiques;

#[cfg(test)]
mod tests_fuzz_safe;

#[cfg(test)]
mod tests_proprietes;

// API publique minimale
pub use erreurs::{ErreurDomaine, ErreurEval, ErreurRegles};
pub use eval::{analyse, eval_detaille, eval_expression, eval_options, meval, DemarcheNoyau};
pub use expr::Expr;
pub use finalisation::Valeur;
pub use options::Options;
pub use regles::Ruleset;
