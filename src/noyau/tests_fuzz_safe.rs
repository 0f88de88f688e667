//! Tests fuzz safe : différentiel + déterminisme + limites contrôlées.
//!
//! But : marteler le pipeline sans brûler la machine.
//! - RNG déterministe (seed fixe)
//! - arbres aléatoires `+ - * /` sur des entiers de [-20, 20] (sans 0), pi et e
//! - regroupements aléatoires, et parfois une fonction trig devant un groupe
//! - la valeur de référence est calculée directement sur l'arbre généré,
//!   avec les mêmes opérations f64 : après arrondi à 8 chiffres, égalité exacte
//! - budget temps global

use std::time::{Duration, Instant};

use super::erreurs::{ErreurDomaine, ErreurEval};
use super::eval::eval_expression;
use super::finalisation::{finaliser, Valeur};
use super::regles::Ruleset;

/* ------------------------ RNG déterministe minimal ------------------------ */

#[derive(Clone)]
struct Rng {
    state: u64,
}
impl Rng {
    fn new(seed: u64) -> Self {
        Self { state: seed }
    }
    fn next_u32(&mut self) -> u32 {
        // LCG simple (déterministe)
        self.state = self.state.wrapping_mul(6364136223846793005).wrapping_add(1);
        (self.state >> 32) as u32
    }
    fn pick(&mut self, n: u32) -> u32 {
        if n == 0 {
            0
        } else {
            self.next_u32() % n
        }
    }
    /// Vrai avec probabilité `pour_cent` / 100.
    fn chance(&mut self, pour_cent: u32) -> bool {
        self.pick(100) < pour_cent
    }
}

/* ------------------------ Budget anti-gel ------------------------ */

fn budget(start: Instant, max: Duration) {
    if start.elapsed() > max {
        panic!("budget temps dépassé: {:?}", max);
    }
}

/* ------------------------ Arbre généré ------------------------ */

enum Gen {
    Entier(i32),
    Constante(&'static str, f64),
    Binaire {
        op: char,
        gauche: Box<Gen>,
        droite: Box<Gen>,
        groupe: bool,
        trig: Option<&'static str>,
    },
}

fn gen_feuille(rng: &mut Rng) -> Gen {
    if rng.chance(10) {
        if rng.pick(2) == 0 {
            Gen::Constante("pi", std::f64::consts::PI)
        } else {
            Gen::Constante("e", std::f64::consts::E)
        }
    } else {
        let n = rng.pick(41) as i32 - 20;
        Gen::Entier(if n == 0 { 1 } else { n })
    }
}

fn gen_arbre(rng: &mut Rng, profondeur_max: u32, profondeur: u32) -> Gen {
    let cote = |rng: &mut Rng| {
        if profondeur < profondeur_max && rng.pick(profondeur_max + 1) > profondeur {
            gen_arbre(rng, profondeur_max, profondeur + 1)
        } else {
            gen_feuille(rng)
        }
    };
    let gauche = Box::new(cote(rng));
    let droite = Box::new(cote(rng));

    let groupe = rng.chance(40);
    let trig = if groupe && rng.chance(25) {
        Some(["sin", "cos", "tan"][rng.pick(3) as usize])
    } else {
        None
    };

    Gen::Binaire {
        op: ['+', '-', '*', '/'][rng.pick(4) as usize],
        gauche,
        droite,
        groupe,
        trig,
    }
}

fn palier(op: char) -> u8 {
    match op {
        '*' | '/' => 1,
        _ => 2,
    }
}

/// Rendu texte : un sous-arbre est parenthésé s'il l'a tiré au sort, OU si la
/// précédence usuelle changerait sinon le sens (palier plus faible, ou même
/// palier à droite).
fn rendre(g: &Gen, out: &mut String, force: bool) {
    match g {
        Gen::Entier(n) => out.push_str(&n.to_string()),
        Gen::Constante(nom, _) => out.push_str(nom),
        Gen::Binaire {
            op,
            gauche,
            droite,
            groupe,
            trig,
        } => {
            let parentheses = *groupe || force;
            if parentheses {
                if let Some(f) = trig {
                    out.push(' ');
                    out.push_str(f);
                }
                out.push('(');
            }

            let p = palier(*op);
            let force_g = matches!(**gauche, Gen::Binaire { op: o, .. } if palier(o) > p);
            let force_d = matches!(**droite, Gen::Binaire { op: o, .. } if palier(o) >= p);

            rendre(gauche, out, force_g);
            out.push(' ');
            out.push(*op);
            out.push(' ');
            rendre(droite, out, force_d);

            if parentheses {
                out.push(')');
            }
        }
    }
}

/// Référence : None si une division par zéro apparaît (l'expression est rejetée).
fn reference(g: &Gen) -> Option<f64> {
    match g {
        Gen::Entier(n) => Some(*n as f64),
        Gen::Constante(_, v) => Some(*v),
        Gen::Binaire {
            op,
            gauche,
            droite,
            groupe,
            trig,
        } => {
            let a = reference(gauche)?;
            let b = reference(droite)?;
            let v = match op {
                '+' => a + b,
                '-' => a - b,
                '*' => a * b,
                _ if b == 0.0 => return None,
                _ => a / b,
            };
            // la fonction ne s'applique que si le groupe est rendu
            let v = match (groupe, trig) {
                (true, Some("sin")) => v.sin(),
                (true, Some("cos")) => v.cos(),
                (true, Some("tan")) => v.tan(),
                _ => v,
            };
            Some(v)
        }
    }
}

/* ------------------------ Tests ------------------------ */

#[test]
fn fuzz_safe_differentiel() {
    let t0 = Instant::now();
    let max = Duration::from_millis(500);

    let r = Ruleset::scientifique();
    let mut rng = Rng::new(0xC0FFEE_u64);

    let mut vus = 0usize;
    let mut avec_trig = 0usize;

    while vus < 400 {
        budget(t0, max);

        let g = gen_arbre(&mut rng, 5, 0);
        let Some(attendu) = reference(&g) else {
            continue;
        };
        let mut texte = String::new();
        rendre(&g, &mut texte, false);

        let obtenu = eval_expression(&texte, &r, 8)
            .unwrap_or_else(|e| panic!("expr={texte:?} err={e}"));
        assert_eq!(obtenu, finaliser(attendu, 8), "expr={texte:?}");

        if ["sin(", "cos(", "tan("].iter().any(|f| texte.contains(f)) {
            avec_trig += 1;
        }
        vus += 1;
    }

    // le générateur doit aussi exercer les fonctions
    assert!(avec_trig > 10, "trop peu d'expressions trig: {avec_trig}");
}

#[test]
fn fuzz_safe_determinisme() {
    let r = Ruleset::scientifique();
    let mut a = Rng::new(42);
    let mut b = Rng::new(42);

    for _ in 0..50 {
        let (mut ta, mut tb) = (String::new(), String::new());
        rendre(&gen_arbre(&mut a, 4, 0), &mut ta, false);
        rendre(&gen_arbre(&mut b, 4, 0), &mut tb, false);
        assert_eq!(ta, tb);
        assert_eq!(eval_expression(&ta, &r, 8), eval_expression(&tb, &r, 8));
    }
}

#[test]
fn fuzz_safe_division_par_zero_signalee() {
    // les expressions écartées par la référence échouent proprement côté moteur
    let t0 = Instant::now();
    let max = Duration::from_millis(300);

    let r = Ruleset::scientifique();
    let mut rng = Rng::new(0xBADC0DE_u64);
    let mut vues = 0usize;

    for _ in 0..2000 {
        budget(t0, max);

        let g = gen_arbre(&mut rng, 5, 0);
        if reference(&g).is_some() {
            continue;
        }
        let mut texte = String::new();
        rendre(&g, &mut texte, false);

        match eval_expression(&texte, &r, 8) {
            Err(ErreurEval::Operateur {
                source: ErreurDomaine::DivisionParZero,
                ..
            }) => vues += 1,
            autre => panic!("expr={texte:?} : {autre:?}"),
        }
    }

    assert!(vues > 0, "aucune division par zéro générée");
}

#[test]
fn fuzz_safe_bruit_sans_panique() {
    // entrées arbitraires : Ok ou erreur typée, jamais de panique
    let t0 = Instant::now();
    let max = Duration::from_millis(300);

    const ALPHABET: &[char] = &[
        '1', '2', '0', '.', '+', '-', '*', '/', '%', '^', '(', ')', ' ', 'p', 'i', 's', 'n', '$',
    ];

    let r = Ruleset::scientifique();
    let mut rng = Rng::new(7);
    let mut ok = 0usize;

    for _ in 0..1500 {
        budget(t0, max);

        let n = 1 + rng.pick(16) as usize;
        let texte: String = (0..n)
            .map(|_| ALPHABET[rng.pick(ALPHABET.len() as u32) as usize])
            .collect();

        if let Ok(v) = eval_expression(&texte, &r, 8) {
            if let Valeur::Flottant(x) = v {
                assert!(x.fract() != 0.0 || !x.is_finite() || x.abs() >= 9.2e18);
            }
            ok += 1;
        }
    }

    assert!(ok > 0);
}
