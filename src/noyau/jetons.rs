// src/noyau/jetons.rs
//
// Segmentation + classification, niveau par niveau.
// Dans un groupe, on accumule les caractères d'une même classe dans un tampon ;
// un changement de classe, un espace, un sous-groupe ou une négation vide le tampon
// en UN jeton :
// - chiffres/point => nombre littéral
// - lettres        => identifiant (fonction ou constante du ruleset)
// - symboles       => opérateur du ruleset
//
// Tout segment non reconnu est une erreur portant la sous-chaîne exacte.

use super::erreurs::ErreurEval;
use super::groupement::{Element, GroupeBrut};
use super::regles::{Ruleset, Symbole};

/// Classe d'un caractère de l'entrée.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Classe {
    Chiffre,
    Lettre,
    Symbole,
    Espace,
    Parenthese,
}

pub fn classe_de(c: char) -> Classe {
    if c.is_ascii_digit() || c == '.' {
        Classe::Chiffre
    } else if c.is_alphabetic() || c == '_' {
        Classe::Lettre
    } else if c.is_whitespace() {
        Classe::Espace
    } else if c == '(' || c == ')' {
        Classe::Parenthese
    } else {
        Classe::Symbole
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum Jeton {
    Nombre {
        valeur: f64,
        texte: String,
        position: usize,
    },
    Identifiant {
        nom: String,
        position: usize,
    },
    Operateur {
        symbole: String,
        position: usize,
    },
    Negation {
        position: usize,
    },
    Groupe {
        jetons: Vec<Jeton>,
        position: usize,
    },
}

impl Jeton {
    pub fn position(&self) -> usize {
        match self {
            Jeton::Nombre { position, .. }
            | Jeton::Identifiant { position, .. }
            | Jeton::Operateur { position, .. }
            | Jeton::Negation { position }
            | Jeton::Groupe { position, .. } => *position,
        }
    }
}

/// Tampon du segment en cours.
struct Tampon {
    classe: Classe,
    texte: String,
    position: usize,
}

/// Classe récursivement un groupe brut.
pub fn classer(groupe: &GroupeBrut, ruleset: &Ruleset) -> Result<Vec<Jeton>, ErreurEval> {
    let mut out = Vec::new();
    let mut tampon: Option<Tampon> = None;

    for el in &groupe.elements {
        match el {
            Element::Car { c, position } => {
                let classe = classe_de(*c);

                if let Some(t) = &mut tampon {
                    if t.classe == classe {
                        t.texte.push(*c);
                        continue;
                    }
                }

                vider(&mut tampon, &mut out, ruleset)?;
                if classe != Classe::Espace {
                    tampon = Some(Tampon {
                        classe,
                        texte: c.to_string(),
                        position: *position,
                    });
                }
            }

            Element::Negation { position } => {
                vider(&mut tampon, &mut out, ruleset)?;
                out.push(Jeton::Negation {
                    position: *position,
                });
            }

            Element::Groupe(g) => {
                vider(&mut tampon, &mut out, ruleset)?;
                out.push(Jeton::Groupe {
                    jetons: classer(g, ruleset)?,
                    position: g.position,
                });
            }
        }
    }

    vider(&mut tampon, &mut out, ruleset)?;
    Ok(out)
}

fn vider(
    tampon: &mut Option<Tampon>,
    out: &mut Vec<Jeton>,
    ruleset: &Ruleset,
) -> Result<(), ErreurEval> {
    if let Some(t) = tampon.take() {
        out.push(reconnaitre(t, ruleset)?);
    }
    Ok(())
}

fn reconnaitre(t: Tampon, ruleset: &Ruleset) -> Result<Jeton, ErreurEval> {
    let inconnu = |t: Tampon| ErreurEval::JetonInconnu {
        jeton: t.texte,
        position: t.position,
    };

    match t.classe {
        Classe::Chiffre => match t.texte.parse::<f64>() {
            Ok(valeur) => Ok(Jeton::Nombre {
                valeur,
                texte: t.texte,
                position: t.position,
            }),
            Err(_) => Err(inconnu(t)),
        },

        Classe::Lettre => match ruleset.symbole(&t.texte) {
            Some(Symbole::Fonction(_)) | Some(Symbole::Constante(_)) => Ok(Jeton::Identifiant {
                nom: t.texte,
                position: t.position,
            }),
            _ => Err(inconnu(t)),
        },

        Classe::Symbole => match ruleset.operateur(&t.texte) {
            Some(_) => Ok(Jeton::Operateur {
                symbole: t.texte,
                position: t.position,
            }),
            None => Err(inconnu(t)),
        },

        Classe::Espace | Classe::Parenthese => Err(ErreurEval::Incoherence(format!(
            "segment inattendu '{}'",
            t.texte
        ))),
    }
}
