//! calculatrice_modeval : évaluation d'expressions infixes à règles configurables.
//!
//! ```
//! use calculatrice_modeval::{meval, Ruleset, Valeur};
//!
//! assert_eq!(meval("8 - 3 - 2", None), Ok(Valeur::Entier(3)));
//! assert_eq!(
//!     meval("sin(0) + cos(0)", Some(&Ruleset::scientifique())),
//!     Ok(Valeur::Entier(1))
//! );
//! ```

pub mod noyau;

pub use noyau::{
    analyse, eval_detaille, eval_expression, eval_options, meval, DemarcheNoyau, ErreurEval,
    ErreurRegles, Options, Ruleset, Valeur,
};
