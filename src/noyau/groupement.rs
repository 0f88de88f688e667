// src/noyau/groupement.rs
//
// Groupement par parenthèses : flux de caractères -> arbre de groupes.
// - '(' ouvre un sous-groupe (ajouté au niveau courant) et descend
// - ')' remonte d'un niveau
// - tout le reste est ajouté tel quel au niveau courant (pas encore classé)
//
// Pile explicite de groupes ouverts (pas de récursion), profondeur bornée.

use super::erreurs::ErreurEval;
use super::negation::Car;

#[derive(Clone, Debug, PartialEq)]
pub enum Element {
    Car { c: char, position: usize },
    Negation { position: usize },
    Groupe(GroupeBrut),
}

/// Un niveau de parenthèses ; `position` = celle de '(' (0 pour la racine).
#[derive(Clone, Debug, Default, PartialEq)]
pub struct GroupeBrut {
    pub elements: Vec<Element>,
    pub position: usize,
}

impl GroupeBrut {
    fn new(position: usize) -> Self {
        Self {
            elements: Vec::new(),
            position,
        }
    }
}

/// Construit l'arbre de groupes.
///
/// Erreurs :
/// - ')' sans ouvrante : immédiatement
/// - '(' non fermée : après le parcours complet
/// - imbrication au-delà de `profondeur_max`
pub fn grouper(cars: &[Car], profondeur_max: usize) -> Result<GroupeBrut, ErreurEval> {
    let mut pile: Vec<GroupeBrut> = vec![GroupeBrut::new(0)];

    for car in cars {
        match *car {
            Car::Brut { c: '(', position } => {
                if pile.len() > profondeur_max {
                    return Err(ErreurEval::ProfondeurExcessive {
                        max: profondeur_max,
                    });
                }
                pile.push(GroupeBrut::new(position));
            }

            Car::Brut { c: ')', position } => {
                if pile.len() == 1 {
                    return Err(ErreurEval::Parentheses {
                        position,
                        ouvrante: false,
                    });
                }
                let ferme = pile.pop().ok_or_else(pile_vide)?;
                courant(&mut pile)?.elements.push(Element::Groupe(ferme));
            }

            Car::Brut { c, position } => {
                courant(&mut pile)?.elements.push(Element::Car { c, position });
            }

            Car::Negation { position } => {
                courant(&mut pile)?
                    .elements
                    .push(Element::Negation { position });
            }
        }
    }

    if let Some(ouverte) = pile.get(1) {
        return Err(ErreurEval::Parentheses {
            position: ouverte.position,
            ouvrante: true,
        });
    }

    pile.pop().ok_or_else(pile_vide)
}

fn courant(pile: &mut [GroupeBrut]) -> Result<&mut GroupeBrut, ErreurEval> {
    pile.last_mut().ok_or_else(pile_vide)
}

fn pile_vide() -> ErreurEval {
    ErreurEval::Incoherence("pile de groupes vide".into())
}
