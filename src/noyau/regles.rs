// src/noyau/regles.rs
//
// Ruleset : configuration “pluggable” du noyau.
// - paliers d'opérateurs binaires (le premier lie le plus fort)
// - fonctions unaires (sin, cos…)
// - constantes nommées (pi, e…)
//
// Contrat :
// - construit une seule fois, immuable ensuite
// - aucun symbole/nom réutilisé entre paliers, fonctions et constantes
// - pointeurs de fonctions simples => Send + Sync, partageable entre threads

use std::collections::{HashMap, HashSet};
use std::f64::consts;

use log::debug;

use super::erreurs::{ErreurDomaine, ErreurRegles};
use super::jetons::{classe_de, Classe};
use super::operations;

/// Fonction binaire d'un opérateur : (gauche, droite) -> valeur.
pub type FnBinaire = fn(f64, f64) -> Result<f64, ErreurDomaine>;

/// Fonction unaire nommée : argument -> valeur.
pub type FnUnaire = fn(f64) -> Result<f64, ErreurDomaine>;

/// Un palier de précédence : symboles + fonctions binaires.
pub type Palier<'a> = Vec<(&'a str, FnBinaire)>;

/// Ce qu'un symbole/nom désigne dans le ruleset.
#[derive(Clone, Copy, Debug)]
pub enum Symbole {
    Operateur { palier: usize, f: FnBinaire },
    Fonction(FnUnaire),
    Constante(f64),
}

#[derive(Clone, Debug)]
pub struct Ruleset {
    paliers: Vec<Vec<String>>,
    fonctions: Vec<String>,
    constantes: Vec<String>,

    index: HashMap<String, Symbole>,

    // caractères pouvant terminer un symbole d'opérateur (lookbehind du moins unaire)
    fins_operateurs: HashSet<char>,
}

impl Ruleset {
    /// Construit un ruleset en validant l'unicité globale des symboles et noms.
    pub fn build(
        paliers: Vec<Palier<'_>>,
        fonctions: Vec<(&str, FnUnaire)>,
        constantes: Vec<(&str, f64)>,
    ) -> Result<Self, ErreurRegles> {
        let mut r = Ruleset {
            paliers: Vec::with_capacity(paliers.len()),
            fonctions: Vec::with_capacity(fonctions.len()),
            constantes: Vec::with_capacity(constantes.len()),
            index: HashMap::new(),
            fins_operateurs: HashSet::new(),
        };

        for (niveau, palier) in paliers.into_iter().enumerate() {
            if palier.is_empty() {
                return Err(ErreurRegles::PalierVide(niveau));
            }

            let mut noms = Vec::with_capacity(palier.len());
            for (symbole, f) in palier {
                if !est_symbole_valide(symbole) {
                    return Err(ErreurRegles::SymboleInvalide(symbole.to_string()));
                }
                r.inserer(symbole, Symbole::Operateur { palier: niveau, f })?;
                if let Some(fin) = symbole.chars().last() {
                    r.fins_operateurs.insert(fin);
                }
                noms.push(symbole.to_string());
            }
            r.paliers.push(noms);
        }

        for (nom, f) in fonctions {
            if !est_nom_valide(nom) {
                return Err(ErreurRegles::NomInvalide(nom.to_string()));
            }
            r.inserer(nom, Symbole::Fonction(f))?;
            r.fonctions.push(nom.to_string());
        }

        for (nom, v) in constantes {
            if !est_nom_valide(nom) {
                return Err(ErreurRegles::NomInvalide(nom.to_string()));
            }
            r.inserer(nom, Symbole::Constante(v))?;
            r.constantes.push(nom.to_string());
        }

        debug!(
            "ruleset construit : {} paliers, {} fonctions, {} constantes",
            r.paliers.len(),
            r.fonctions.len(),
            r.constantes.len()
        );

        Ok(r)
    }

    fn inserer(&mut self, nom: &str, s: Symbole) -> Result<(), ErreurRegles> {
        if self.index.insert(nom.to_string(), s).is_some() {
            return Err(ErreurRegles::SymboleDuplique(nom.to_string()));
        }
        Ok(())
    }

    /// Ruleset par défaut : puissance ; * / % ; + -
    /// (aucune fonction, aucune constante).
    pub fn standard() -> Self {
        Self::build(paliers_standard(), Vec::new(), Vec::new())
            .expect("tables standard : symboles uniques")
    }

    /// Ruleset “scientifique” : standard + sin/cos/tan + pi/e.
    pub fn scientifique() -> Self {
        Self::build(paliers_standard(), fonctions_trig(), constantes_usuelles())
            .expect("tables scientifiques : symboles uniques")
    }

    /* ------------------------ Lecture seule ------------------------ */

    /// Ce que désigne `nom` (opérateur, fonction ou constante).
    pub fn symbole(&self, nom: &str) -> Option<Symbole> {
        self.index.get(nom).copied()
    }

    /// Palier + fonction d'un opérateur.
    pub fn operateur(&self, symbole: &str) -> Option<(usize, FnBinaire)> {
        match self.symbole(symbole)? {
            Symbole::Operateur { palier, f } => Some((palier, f)),
            _ => None,
        }
    }

    pub fn fonction(&self, nom: &str) -> Option<FnUnaire> {
        match self.symbole(nom)? {
            Symbole::Fonction(f) => Some(f),
            _ => None,
        }
    }

    pub fn constante(&self, nom: &str) -> Option<f64> {
        match self.symbole(nom)? {
            Symbole::Constante(v) => Some(v),
            _ => None,
        }
    }

    /// Vrai si `c` peut terminer un symbole d'opérateur.
    pub fn termine_operateur(&self, c: char) -> bool {
        self.fins_operateurs.contains(&c)
    }

    pub fn nb_paliers(&self) -> usize {
        self.paliers.len()
    }

    /// Symboles d'un palier (ordre de déclaration).
    pub fn palier(&self, niveau: usize) -> Option<&[String]> {
        self.paliers.get(niveau).map(Vec::as_slice)
    }

    pub fn fonctions(&self) -> &[String] {
        &self.fonctions
    }

    pub fn constantes(&self) -> &[String] {
        &self.constantes
    }
}

impl Default for Ruleset {
    fn default() -> Self {
        Self::standard()
    }
}

/* ------------------------ Tables fournies ------------------------ */

fn paliers_standard() -> Vec<Palier<'static>> {
    vec![
        vec![("^", operations::pow as FnBinaire), ("**", operations::pow as FnBinaire)],
        vec![
            ("*", operations::mul as FnBinaire),
            ("/", operations::div as FnBinaire),
            ("%", operations::modulo as FnBinaire),
        ],
        vec![("+", operations::add as FnBinaire), ("-", operations::sub as FnBinaire)],
    ]
}

fn fonctions_trig() -> Vec<(&'static str, FnUnaire)> {
    vec![
        ("sin", operations::sin as FnUnaire),
        ("cos", operations::cos as FnUnaire),
        ("tan", operations::tan as FnUnaire),
    ]
}

fn constantes_usuelles() -> Vec<(&'static str, f64)> {
    vec![("pi", consts::PI), ("e", consts::E)]
}

/* ------------------------ Validation des noms ------------------------ */

fn est_symbole_valide(s: &str) -> bool {
    !s.is_empty() && s.chars().all(|c| classe_de(c) == Classe::Symbole)
}

fn est_nom_valide(s: &str) -> bool {
    !s.is_empty() && s.chars().all(|c| classe_de(c) == Classe::Lettre)
}
