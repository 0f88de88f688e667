//! src/app/etat.rs
//!
//! État UI (sans vue).
//!
//! Rôle : contenir l’état de la calculatrice (entrée, résultat, erreur, chiffres,
//! ruleset choisi, démarche) et offrir des opérations simples (C/CLR/AC).
//!
//! Contrats :
//! - Aucune analyse ici : l’évaluation passe par le noyau (vue.rs).
//! - Actions déterministes, sans effet de bord caché.
//! - Bornes sur le nombre de chiffres.

use calculatrice_modeval::noyau::options::{CHIFFRES_DEFAUT, CHIFFRES_MAX};
use calculatrice_modeval::{DemarcheNoyau, Options, Ruleset, Valeur};

/// Rulesets proposés dans l’interface.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ChoixRegles {
    #[default]
    Standard,
    Scientifique,
}

impl ChoixRegles {
    pub const TOUS: [ChoixRegles; 2] = [ChoixRegles::Standard, ChoixRegles::Scientifique];

    pub fn libelle(self) -> &'static str {
        match self {
            ChoixRegles::Standard => "standard",
            ChoixRegles::Scientifique => "scientifique",
        }
    }
}

#[derive(Clone, Default, Debug)]
pub struct Demarche {
    pub jetons: String,
    pub arbre: String,
    pub brut: String,
    pub note: String,
}

impl From<DemarcheNoyau> for Demarche {
    fn from(d: DemarcheNoyau) -> Self {
        Self {
            jetons: d.jetons,
            arbre: d.arbre,
            brut: format!("{}", d.brut),
            note: d.note,
        }
    }
}

#[derive(Clone, Debug)]
pub struct AppCalc {
    // --- entrée utilisateur ---
    pub entree: String,

    // --- sorties ---
    pub resultat: String,
    pub entier: bool, // le résultat a été ramené à un entier
    pub erreur: String,

    // --- démarche (panneau d’explication) ---
    pub demarche: Demarche,

    // --- paramètres ---
    pub chiffres: i32,
    pub choix: ChoixRegles,

    // rulesets construits une fois, partagés par toutes les évaluations
    standard: Ruleset,
    scientifique: Ruleset,

    // --- UX ---
    // Permet à vue.rs de redonner le focus à l’entrée après un clic sur un bouton.
    pub focus_entree: bool,
}

impl Default for AppCalc {
    fn default() -> Self {
        Self {
            entree: String::new(),
            resultat: String::new(),
            entier: false,
            erreur: String::new(),
            demarche: Demarche::default(),
            chiffres: CHIFFRES_DEFAUT,
            choix: ChoixRegles::default(),
            standard: Ruleset::standard(),
            scientifique: Ruleset::scientifique(),
            focus_entree: true, // au lancement, on veut pouvoir taper tout de suite
        }
    }
}

impl AppCalc {
    /* ------------------------ Paramètres ------------------------ */

    pub fn ruleset(&self) -> &Ruleset {
        match self.choix {
            ChoixRegles::Standard => &self.standard,
            ChoixRegles::Scientifique => &self.scientifique,
        }
    }

    pub fn options(&self) -> Options {
        Options::new(self.chiffres)
    }

    /// Garde-fou : 0 (pas d’arrondi) ..= CHIFFRES_MAX.
    pub fn set_chiffres(&mut self, chiffres: i32) {
        self.chiffres = chiffres.clamp(0, CHIFFRES_MAX);
        self.focus_entree = true;
    }

    pub fn set_choix(&mut self, choix: ChoixRegles) {
        self.choix = choix;
        self.focus_entree = true;
    }

    /* ------------------------ Actions “boutons” (état seulement) ------------------------ */

    /// AC : remise à zéro totale (entrée + résultats + paramètres par défaut).
    pub fn reset_total(&mut self) {
        self.entree.clear();
        self.clear_resultats();
        self.chiffres = CHIFFRES_DEFAUT;
        self.choix = ChoixRegles::default();
        self.focus_entree = true;
    }

    /// C : effacer seulement l’entrée (sans toucher aux résultats).
    pub fn clear_entree(&mut self) {
        self.entree.clear();
        self.focus_entree = true;
    }

    fn clear_demarche(&mut self) {
        self.demarche = Demarche::default();
    }

    /// CLR : effacer résultat + erreur + démarche (sans toucher à l’entrée).
    pub fn clear_resultats(&mut self) {
        self.resultat.clear();
        self.entier = false;
        self.erreur.clear();
        self.clear_demarche();
        self.focus_entree = true;
    }

    /// Utilitaire : placer une erreur.
    ///
    /// Choix UX :
    /// - On CONSERVE `resultat` (dernier résultat) pour ne pas “effacer l’écran” sur une faute.
    /// - On efface la démarche (elle ne correspond plus à l’entrée).
    pub fn set_erreur(&mut self, msg: impl Into<String>) {
        self.erreur = msg.into();
        self.clear_demarche();
        self.focus_entree = true;
    }

    /// Utilitaire : déposer un résultat complet (valeur + démarche).
    pub fn set_resultats(&mut self, valeur: Valeur, demarche: Demarche) {
        self.erreur.clear();
        self.resultat = valeur.to_string();
        self.entier = valeur.est_entier();
        self.demarche = demarche;
        self.focus_entree = true;
    }
}
