// src/noyau/arbre.rs
//
// Jetons classés -> Expr, niveau par niveau.
//
// Pour chaque niveau :
// 1) Séquence : les sous-groupes sont construits d'abord (récursion = profondeur de
//    parenthèses), les constantes deviennent des valeurs, chaque fonction consomme
//    l'élément qui la suit (groupe ou constante), chaque négation se lie au SEUL
//    atome qui suit. On obtient : opérande (opérateur opérande)*
// 2) Repli par paliers : du palier le plus fort au plus faible, chaque opérateur du
//    palier courant fusionne (gauche, op, droite) de gauche à droite.
//    => repli associatif à gauche MÊME pour la puissance : 2^3^2 == (2^3)^2 == 64.
//
// Toutes les erreurs de structure sortent d'ici : aucun calcul n'est fait.

use log::trace;

use super::erreurs::ErreurEval;
use super::expr::Expr;
use super::jetons::Jeton;
use super::regles::{FnBinaire, Ruleset, Symbole};

enum Piece {
    Operande(Expr),
    Operateur(Op),
}

struct Op {
    symbole: String,
    palier: usize,
    f: FnBinaire,
    position: usize,
}

/// Construit l'arbre de l'expression complète.
pub fn construire(jetons: &[Jeton], ruleset: &Ruleset) -> Result<Expr, ErreurEval> {
    if jetons.is_empty() {
        return Err(ErreurEval::ExpressionVide);
    }
    construire_niveau(jetons, 0, ruleset)
}

fn construire_niveau(
    jetons: &[Jeton],
    position: usize,
    ruleset: &Ruleset,
) -> Result<Expr, ErreurEval> {
    if jetons.is_empty() {
        return Err(ErreurEval::GroupeVide { position });
    }
    let pieces = sequencer(jetons, ruleset)?;
    replier(pieces, ruleset.nb_paliers())
}

/* ------------------------ 1) Séquence ------------------------ */

fn sequencer(jetons: &[Jeton], ruleset: &Ruleset) -> Result<Vec<Piece>, ErreurEval> {
    let mut pieces: Vec<Piece> = Vec::with_capacity(jetons.len());
    let mut negations: Vec<usize> = Vec::new();
    let mut i = 0;

    while i < jetons.len() {
        let jeton = &jetons[i];
        i += 1;

        let atome = match jeton {
            Jeton::Negation { position } => {
                negations.push(*position);
                continue;
            }

            Jeton::Operateur { symbole, position } => {
                if let Some(&p) = negations.last() {
                    return Err(moins_orphelin(p));
                }
                let (palier, f) = ruleset.operateur(symbole).ok_or_else(|| {
                    ErreurEval::JetonInconnu {
                        jeton: symbole.clone(),
                        position: *position,
                    }
                })?;
                pieces.push(Piece::Operateur(Op {
                    symbole: symbole.clone(),
                    palier,
                    f,
                    position: *position,
                }));
                continue;
            }

            Jeton::Nombre { valeur, .. } => Expr::Nombre(*valeur),

            Jeton::Groupe { jetons, position } => construire_niveau(jetons, *position, ruleset)?,

            Jeton::Identifiant { nom, position } => match ruleset.symbole(nom) {
                Some(Symbole::Constante(valeur)) => Expr::Constante {
                    nom: nom.clone(),
                    valeur,
                },
                Some(Symbole::Fonction(f)) => {
                    let arg = argument(jetons.get(i), nom, *position, ruleset)?;
                    i += 1;
                    Expr::Fonction {
                        nom: nom.clone(),
                        f,
                        arg: Box::new(arg),
                    }
                }
                _ => {
                    return Err(ErreurEval::JetonInconnu {
                        jeton: nom.clone(),
                        position: *position,
                    })
                }
            },
        };

        // la négation la plus proche de l'atome s'applique en premier
        let atome = negations
            .drain(..)
            .fold(atome, |e, _| Expr::Negation(Box::new(e)));

        if let Some(Piece::Operande(_)) = pieces.last() {
            return Err(ErreurEval::OperandesAdjacentes {
                position: jeton.position(),
            });
        }
        pieces.push(Piece::Operande(atome));
    }

    if let Some(&p) = negations.first() {
        return Err(moins_orphelin(p));
    }

    Ok(pieces)
}

/// Argument d'une fonction : l'élément suivant, qui doit déjà être une valeur
/// (groupe parenthésé ou constante).
fn argument(
    suivant: Option<&Jeton>,
    fonction: &str,
    position: usize,
    ruleset: &Ruleset,
) -> Result<Expr, ErreurEval> {
    let manquant = || ErreurEval::ArgumentManquant {
        fonction: fonction.to_string(),
        position,
    };

    match suivant {
        Some(Jeton::Groupe { jetons, .. }) if jetons.is_empty() => Err(manquant()),
        Some(Jeton::Groupe { jetons, position }) => construire_niveau(jetons, *position, ruleset),
        Some(Jeton::Identifiant { nom, .. }) => match ruleset.constante(nom) {
            Some(valeur) => Ok(Expr::Constante {
                nom: nom.clone(),
                valeur,
            }),
            None => Err(manquant()),
        },
        _ => Err(manquant()),
    }
}

fn moins_orphelin(position: usize) -> ErreurEval {
    ErreurEval::OperandeManquant {
        symbole: "-".into(),
        position,
    }
}

/* ------------------------ 2) Repli par paliers ------------------------ */

fn replier(pieces: Vec<Piece>, nb_paliers: usize) -> Result<Expr, ErreurEval> {
    let mut operandes: Vec<Expr> = Vec::new();
    let mut operateurs: Vec<Op> = Vec::new();

    // alternance stricte : opérande (opérateur opérande)*
    for piece in pieces {
        match piece {
            Piece::Operande(e) => operandes.push(e),
            Piece::Operateur(op) => {
                if operandes.len() == operateurs.len() {
                    return Err(ErreurEval::OperandeManquant {
                        symbole: op.symbole,
                        position: op.position,
                    });
                }
                operateurs.push(op);
            }
        }
    }
    if let Some(op) = operateurs.last() {
        if operandes.len() == operateurs.len() {
            return Err(ErreurEval::OperandeManquant {
                symbole: op.symbole.clone(),
                position: op.position,
            });
        }
    }

    for palier in 0..nb_paliers {
        if operateurs.is_empty() {
            break;
        }

        let mut restants_ops = Vec::with_capacity(operateurs.len());
        let mut restants = Vec::with_capacity(operandes.len());

        let mut droites = operandes.into_iter();
        let premier = droites.next().ok_or_else(|| incoherence("niveau sans opérande"))?;
        restants.push(premier);

        for (op, droite) in operateurs.into_iter().zip(droites) {
            if op.palier == palier {
                let gauche = restants.pop().ok_or_else(|| incoherence("repli sans gauche"))?;
                trace!("repli palier {palier} : '{}'", op.symbole);
                restants.push(Expr::Binaire {
                    symbole: op.symbole,
                    f: op.f,
                    gauche: Box::new(gauche),
                    droite: Box::new(droite),
                });
            } else {
                restants_ops.push(op);
                restants.push(droite);
            }
        }

        operandes = restants;
        operateurs = restants_ops;
    }

    match (operandes.len(), operateurs.is_empty()) {
        (1, true) => operandes.pop().ok_or_else(|| incoherence("résultat absent")),
        (n, _) => Err(incoherence(&format!(
            "{n} opérandes et {} opérateurs après repli",
            operateurs.len()
        ))),
    }
}

fn incoherence(msg: &str) -> ErreurEval {
    ErreurEval::Incoherence(msg.to_string())
}
