// src/noyau/options.rs
//
// Réglages d'une évaluation (indépendants du ruleset).

/// Chiffres après la virgule par défaut.
pub const CHIFFRES_DEFAUT: i32 = 8;

/// Au-delà, un f64 n'a plus de chiffres significatifs à offrir.
pub const CHIFFRES_MAX: i32 = 17;

/// Imbrication maximale de parenthèses.
pub const PROFONDEUR_DEFAUT: usize = 256;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Options {
    /// <= 0 : pas d'arrondi.
    pub chiffres: i32,
    pub profondeur_max: usize,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            chiffres: CHIFFRES_DEFAUT,
            profondeur_max: PROFONDEUR_DEFAUT,
        }
    }
}

impl Options {
    pub fn new(chiffres: i32) -> Self {
        Self {
            chiffres: chiffres.min(CHIFFRES_MAX),
            ..Self::default()
        }
    }

    pub fn with_profondeur_max(self, profondeur_max: usize) -> Self {
        Self {
            profondeur_max,
            ..self
        }
    }
}
