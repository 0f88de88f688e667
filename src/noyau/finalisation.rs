// src/noyau/finalisation.rs
//
// Résultat final :
// 1) arrondi à `chiffres` décimales (si chiffres > 0 et valeur finie)
// 2) coercition : une valeur entière (après arrondi) devient un entier
//
// L'arrondi passe par la représentation décimale (format!), pas par x*10^n :
// 0.125 arrondi à 2 chiffres donne bien ce qu'affiche "{:.2}".

use std::fmt;

use num_traits::ToPrimitive;

use super::options::CHIFFRES_MAX;

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Valeur {
    Entier(i64),
    Flottant(f64),
}

impl Valeur {
    pub fn as_f64(&self) -> f64 {
        match *self {
            Valeur::Entier(n) => n as f64,
            Valeur::Flottant(x) => x,
        }
    }

    pub fn est_entier(&self) -> bool {
        matches!(self, Valeur::Entier(_))
    }
}

impl fmt::Display for Valeur {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Valeur::Entier(n) => write!(f, "{n}"),
            Valeur::Flottant(x) => write!(f, "{x}"),
        }
    }
}

pub fn arrondir(x: f64, chiffres: i32) -> f64 {
    if chiffres <= 0 || !x.is_finite() {
        return x;
    }
    let prec = chiffres.min(CHIFFRES_MAX) as usize;
    format!("{x:.prec$}").parse().unwrap_or(x)
}

pub fn finaliser(x: f64, chiffres: i32) -> Valeur {
    let x = arrondir(x, chiffres);

    // fract() == 0 exclut NaN et les infinis ; to_i64 exclut |x| >= 2^63
    if x.is_finite() && x.fract() == 0.0 {
        if let Some(n) = x.to_i64() {
            return Valeur::Entier(n);
        }
    }
    Valeur::Flottant(x)
}
