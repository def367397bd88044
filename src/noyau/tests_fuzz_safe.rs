//! Tests fuzz safe : robustesse + déterminisme + limites contrôlées.
//!
//! But : marteler le pipeline sans brûler la machine.
//! - RNG déterministe (seed fixe)
//! - profondeur bornée
//! - budget temps global
//! - expressions bien formées => toujours Ok (jamais d’erreur, jamais de panique)
//! - expressions mutilées => Ok ou ErreurCalcul, jamais de panique

use std::time::{Duration, Instant};

use super::eval::{ModeAngle, Moteur};
use super::format::Resultat;

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
    fn coin(&mut self) -> bool {
        (self.next_u32() & 1) == 1
    }
}

/* ------------------------ Budget anti-gel ------------------------ */

fn budget(start: Instant, max: Duration) {
    if start.elapsed() > max {
        panic!("budget temps dépassé: {:?}", max);
    }
}

fn check_invariant_resultat(r: &Resultat) {
    if let Resultat::Nombre(v) = r {
        assert!(v.is_finite(), "Nombre doit être fini: {v}");
    }
}

/* ------------------------ Génération d’expressions (bornée) ------------------------ */

fn gen_nombre(rng: &mut Rng) -> String {
    match rng.pick(6) {
        0 => "0".to_string(),
        1 => format!("{}", rng.pick(10)),
        2 => format!("{}.{}", rng.pick(100), rng.pick(1000)),
        3 => format!("{}e{}", rng.pick(9) + 1, rng.pick(5)),
        4 => "π".to_string(),
        _ => "e".to_string(),
    }
}

fn gen_expr(rng: &mut Rng, depth: usize) -> String {
    if depth == 0 {
        return gen_nombre(rng);
    }

    let sous = |rng: &mut Rng| gen_expr(rng, depth - 1);

    match rng.pick(10) {
        0 => gen_nombre(rng),
        1 => {
            let op = ["+", "-", "*", "/", "%", "^"][rng.pick(6) as usize];
            let (a, b) = (sous(rng), sous(rng));
            if rng.coin() {
                format!("({a}{op}{b})")
            } else {
                format!("{a}{op}{b}")
            }
        }
        2 | 3 => {
            let f = ["√", "∛", "lg", "ln", "sin", "cos", "tan", "cot"][rng.pick(8) as usize];
            format!("{f}({})", sous(rng))
        }
        4 => format!("-{}", sous(rng)),
        5 => format!("(-{})", sous(rng)),
        6 => format!("({})!", rng.pick(12)),
        7 => format!("({})^2", sous(rng)),
        _ => format!("({}+{})", sous(rng), sous(rng)),
    }
}

/// Retire ou double un caractère au hasard (entrée mal formée probable).
fn mutile(rng: &mut Rng, s: &str) -> String {
    let mut chars: Vec<char> = s.chars().collect();
    if chars.is_empty() {
        return String::new();
    }
    let i = rng.pick(chars.len() as u32) as usize;
    if rng.coin() {
        chars.remove(i);
    } else {
        let c = chars[i];
        chars.insert(i, c);
    }
    chars.into_iter().collect()
}

/* ------------------------ Tests ------------------------ */

#[test]
fn fuzz_safe_bien_forme_toujours_ok() {
    let t0 = Instant::now();
    let max = Duration::from_millis(500);

    let mut rng = Rng::new(0xC0FFEE_u64);
    let mut m = Moteur::new();

    let mut seen_nombre = 0usize;
    let mut seen_indefini = 0usize;

    for k in 0..300 {
        budget(t0, max);

        let expr = gen_expr(&mut rng, 4);
        let mode = if k % 2 == 0 {
            ModeAngle::Radian
        } else {
            ModeAngle::Degre
        };
        m.set_mode_angle(mode);

        let r = m
            .evaluate(&expr)
            .unwrap_or_else(|e| panic!("erreur non attendue: expr={expr:?} err={e}"));
        check_invariant_resultat(&r);

        match r {
            Resultat::Nombre(_) => seen_nombre += 1,
            Resultat::Indefini => seen_indefini += 1,
        }
    }

    // On veut voir un mix des deux, sinon le fuzz ne “balaye” rien.
    assert!(seen_nombre > 20, "trop peu de nombres: {seen_nombre}");
    assert!(seen_indefini > 0, "aucun indéfini vu: fuzz trop “sage”");
}

#[test]
fn fuzz_safe_determinisme() {
    let mut rng_a = Rng::new(0xBADC0DE_u64);
    let mut rng_b = Rng::new(0xBADC0DE_u64);
    let m = Moteur::new();

    for _ in 0..100 {
        let ea = gen_expr(&mut rng_a, 3);
        let eb = gen_expr(&mut rng_b, 3);
        assert_eq!(ea, eb);

        let ra = m.evaluate(&ea).map(|r| r.to_string());
        let rb = m.evaluate(&eb).map(|r| r.to_string());
        assert_eq!(ra, rb, "expr={ea:?}");
    }
}

#[test]
fn fuzz_safe_entrees_mutilees_sans_panique() {
    let t0 = Instant::now();
    let max = Duration::from_millis(500);

    let mut rng = Rng::new(0x5EED_u64);
    let m = Moteur::new();

    let mut seen_err = 0usize;

    for _ in 0..300 {
        budget(t0, max);

        let propre = gen_expr(&mut rng, 3);
        let expr = mutile(&mut rng, &propre);

        match m.evaluate(&expr) {
            Ok(r) => check_invariant_resultat(&r),
            Err(e) => {
                // message toujours lisible
                assert!(!e.to_string().is_empty());
                seen_err += 1;
            }
        }
    }

    assert!(seen_err > 0, "aucune erreur vue: mutation trop “sage”");
}
