// src/noyau/erreurs.rs
//
// Erreurs typées du noyau.
// - ErreurRegles  : construction d'un Ruleset (une seule fois)
// - ErreurDomaine : échec d'une fonction numérique (÷0, hors domaine…)
// - ErreurEval    : tout ce qui peut échouer pendant une évaluation
//
// Les positions sont des indices de caractères (pas d'octets) dans l'entrée.

use thiserror::Error;

/// Échec à la construction d'un Ruleset.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ErreurRegles {
    #[error("symbole défini plusieurs fois : '{0}'")]
    SymboleDuplique(String),

    #[error("symbole d'opérateur invalide : '{0}' (ni chiffre, ni lettre, ni espace, ni parenthèse)")]
    SymboleInvalide(String),

    #[error("nom de fonction/constante invalide : '{0}' (lettres ou '_' seulement)")]
    NomInvalide(String),

    #[error("palier de précédence vide (index {0})")]
    PalierVide(usize),
}

/// Échec levé par une fonction numérique elle-même.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErreurDomaine {
    #[error("division par zéro")]
    DivisionParZero,

    #[error("résultat complexe (non supporté)")]
    ResultatComplexe,

    #[error("débordement numérique")]
    Debordement,

    #[error("argument hors domaine")]
    HorsDomaine,
}

/// Échec d'une évaluation.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ErreurEval {
    #[error("Entrée vide")]
    ExpressionVide,

    #[error("{} (position {position})", texte_parenthese(.ouvrante))]
    Parentheses { position: usize, ouvrante: bool },

    #[error("imbrication trop profonde (max {max})")]
    ProfondeurExcessive { max: usize },

    #[error("jeton inconnu : '{jeton}' (position {position})")]
    JetonInconnu { jeton: String, position: usize },

    #[error("opérateur attendu entre deux nombres (position {position})")]
    OperandesAdjacentes { position: usize },

    #[error("fonction '{fonction}' sans argument (position {position})")]
    ArgumentManquant { fonction: String, position: usize },

    #[error("groupe vide (position {position})")]
    GroupeVide { position: usize },

    #[error("opérande manquant pour '{symbole}' (position {position})")]
    OperandeManquant { symbole: String, position: usize },

    #[error("{source} : {gauche} {symbole} {droite}")]
    Operateur {
        symbole: String,
        gauche: f64,
        droite: f64,
        source: ErreurDomaine,
    },

    #[error("{source} : {nom}({argument})")]
    Fonction {
        nom: String,
        argument: f64,
        source: ErreurDomaine,
    },

    #[error("incohérence interne : {0}")]
    Incoherence(String),
}

fn texte_parenthese(ouvrante: &bool) -> &'static str {
    if *ouvrante {
        "parenthèse ouvrante non fermée"
    } else {
        "parenthèse fermante sans ouvrante"
    }
}

impl ErreurEval {
    /// Position approximative dans l'entrée, quand elle est connue.
    pub fn position(&self) -> Option<usize> {
        use ErreurEval::*;

        match self {
            Parentheses { position, .. }
            | JetonInconnu { position, .. }
            | OperandesAdjacentes { position }
            | ArgumentManquant { position, .. }
            | GroupeVide { position }
            | OperandeManquant { position, .. } => Some(*position),
            _ => None,
        }
    }

    /// Vrai pour les erreurs de structure (détectées avant tout calcul).
    pub fn est_structurelle(&self) -> bool {
        !matches!(
            self,
            ErreurEval::Operateur { .. } | ErreurEval::Fonction { .. }
        )
    }
}
