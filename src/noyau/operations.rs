// src/noyau/operations.rs
//
// Fonctions numériques de base (binaires + unaires) utilisées par les rulesets fournis.
// Sémantique alignée sur l'arithmétique flottante “usuelle” d'un interpréteur :
// - ÷0 et %0 => erreur (pas d'infini silencieux)
// - % : modulo “plancher” (signe du diviseur)
// - ^ : base négative + exposant non entier => résultat complexe => erreur
// - ^ : débordement vers l'infini => erreur

use super::erreurs::ErreurDomaine;

pub fn add(a: f64, b: f64) -> Result<f64, ErreurDomaine> {
    Ok(a + b)
}

pub fn sub(a: f64, b: f64) -> Result<f64, ErreurDomaine> {
    Ok(a - b)
}

pub fn mul(a: f64, b: f64) -> Result<f64, ErreurDomaine> {
    Ok(a * b)
}

pub fn div(a: f64, b: f64) -> Result<f64, ErreurDomaine> {
    if b == 0.0 {
        return Err(ErreurDomaine::DivisionParZero);
    }
    Ok(a / b)
}

/// Modulo plancher : le reste prend le signe du diviseur.
pub fn modulo(a: f64, b: f64) -> Result<f64, ErreurDomaine> {
    if b == 0.0 {
        return Err(ErreurDomaine::DivisionParZero);
    }
    let r = a % b;
    if r != 0.0 && (r < 0.0) != (b < 0.0) {
        Ok(r + b)
    } else {
        Ok(r)
    }
}

pub fn pow(a: f64, b: f64) -> Result<f64, ErreurDomaine> {
    if a == 0.0 && b < 0.0 {
        return Err(ErreurDomaine::DivisionParZero);
    }
    if a < 0.0 && b.is_finite() && b.fract() != 0.0 {
        return Err(ErreurDomaine::ResultatComplexe);
    }

    let r = a.powf(b);
    if r.is_infinite() && a.is_finite() && b.is_finite() {
        return Err(ErreurDomaine::Debordement);
    }
    Ok(r)
}

pub fn sin(x: f64) -> Result<f64, ErreurDomaine> {
    trig(x, f64::sin)
}

pub fn cos(x: f64) -> Result<f64, ErreurDomaine> {
    trig(x, f64::cos)
}

pub fn tan(x: f64) -> Result<f64, ErreurDomaine> {
    trig(x, f64::tan)
}

fn trig(x: f64, f: fn(f64) -> f64) -> Result<f64, ErreurDomaine> {
    if x.is_infinite() {
        return Err(ErreurDomaine::HorsDomaine);
    }
    Ok(f(x))
}
