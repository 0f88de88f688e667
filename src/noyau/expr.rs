// src/noyau/expr.rs
//
// AST explicite (flottants).
// - Nombre    : littéral
// - Constante : constante du ruleset, déjà substituée (on garde le nom pour l'affichage)
// - Negation  : moins unaire, lié à UN seul atome
// - Fonction  : fonction unaire appliquée à son argument
// - Binaire   : opérateur d'un palier, appliqué à (gauche, droite)
//
// L'arbre est construit une fois (arbre.rs), puis évalué ici en une passe
// ITÉRATIVE (pile explicite) : une longue chaîne d'opérateurs ne fait pas
// grossir la pile d'appels. Même règle pour la destruction (Drop) et Debug :
// un arbre penché de 100 000 niveaux ne doit jamais être parcouru récursivement.

use std::fmt;
use std::mem;

use log::trace;

use super::erreurs::ErreurEval;
use super::format::format_arbre;
use super::regles::{FnBinaire, FnUnaire};

pub enum Expr {
    Nombre(f64),
    Constante {
        nom: String,
        valeur: f64,
    },
    Negation(Box<Expr>),
    Fonction {
        nom: String,
        f: FnUnaire,
        arg: Box<Expr>,
    },
    Binaire {
        symbole: String,
        f: FnBinaire,
        gauche: Box<Expr>,
        droite: Box<Expr>,
    },
}

enum Tache<'a> {
    Visiter(&'a Expr),
    Appliquer(&'a Expr),
}

impl Expr {
    /// Réduit l'arbre à une valeur.
    /// Les erreurs des fonctions numériques remontent, étiquetées (symbole + opérandes).
    pub fn evaluer(&self) -> Result<f64, ErreurEval> {
        use Expr::*;

        let mut taches: Vec<Tache<'_>> = vec![Tache::Visiter(self)];
        let mut valeurs: Vec<f64> = Vec::with_capacity(16);

        while let Some(tache) = taches.pop() {
            match tache {
                Tache::Visiter(e) => match e {
                    Nombre(v) | Constante { valeur: v, .. } => valeurs.push(*v),

                    Negation(x) | Fonction { arg: x, .. } => {
                        taches.push(Tache::Appliquer(e));
                        taches.push(Tache::Visiter(x));
                    }

                    // gauche d'abord : empilée en dernier
                    Binaire { gauche, droite, .. } => {
                        taches.push(Tache::Appliquer(e));
                        taches.push(Tache::Visiter(droite));
                        taches.push(Tache::Visiter(gauche));
                    }
                },

                Tache::Appliquer(e) => {
                    let v = match e {
                        Negation(_) => -depiler(&mut valeurs)?,

                        Fonction { nom, f, .. } => {
                            let x = depiler(&mut valeurs)?;
                            f(x).map_err(|source| ErreurEval::Fonction {
                                nom: nom.clone(),
                                argument: x,
                                source,
                            })?
                        }

                        Binaire { symbole, f, .. } => {
                            let d = depiler(&mut valeurs)?;
                            let g = depiler(&mut valeurs)?;
                            let r = f(g, d).map_err(|source| ErreurEval::Operateur {
                                symbole: symbole.clone(),
                                gauche: g,
                                droite: d,
                                source,
                            })?;
                            trace!("{g} {symbole} {d} = {r}");
                            r
                        }

                        Nombre(_) | Constante { .. } => {
                            return Err(ErreurEval::Incoherence(
                                "feuille à appliquer".into(),
                            ))
                        }
                    };
                    valeurs.push(v);
                }
            }
        }

        match valeurs.as_slice() {
            [v] => Ok(*v),
            _ => Err(ErreurEval::Incoherence(format!(
                "{} valeurs restantes après réduction",
                valeurs.len()
            ))),
        }
    }

    /// Nombre de noeuds (itératif).
    pub fn taille(&self) -> usize {
        let mut pile = vec![self];
        let mut n = 0;

        while let Some(e) = pile.pop() {
            n += 1;
            match e {
                Expr::Nombre(_) | Expr::Constante { .. } => {}
                Expr::Negation(x) | Expr::Fonction { arg: x, .. } => pile.push(x),
                Expr::Binaire { gauche, droite, .. } => {
                    pile.push(gauche);
                    pile.push(droite);
                }
            }
        }

        n
    }
}

fn depiler(valeurs: &mut Vec<f64>) -> Result<f64, ErreurEval> {
    valeurs
        .pop()
        .ok_or_else(|| ErreurEval::Incoherence("pile de valeurs vide".into()))
}

impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&format_arbre(self))
    }
}

impl fmt::Debug for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Expr").field(&format_arbre(self)).finish()
    }
}

/// Destruction itérative : les enfants sont détachés sur une pile avant d'être libérés.
impl Drop for Expr {
    fn drop(&mut self) {
        let mut pile: Vec<Expr> = Vec::new();
        detacher(self, &mut pile);
        while let Some(mut e) = pile.pop() {
            detacher(&mut e, &mut pile);
            // `e` n'a plus que des feuilles : sa libération ne descend pas
        }
    }
}

fn detacher(e: &mut Expr, pile: &mut Vec<Expr>) {
    let mut prendre = |x: &mut Box<Expr>| {
        if !matches!(**x, Expr::Nombre(_)) {
            pile.push(mem::replace(&mut **x, Expr::Nombre(0.0)));
        }
    };

    match e {
        Expr::Nombre(_) | Expr::Constante { .. } => {}
        Expr::Negation(x) | Expr::Fonction { arg: x, .. } => prendre(x),
        Expr::Binaire { gauche, droite, .. } => {
            prendre(gauche);
            prendre(droite);
        }
    }
}
