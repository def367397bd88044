//! Tests scientifiques (campagne) : propriétés attendues du moteur, de bout en bout.
//!
//! - précédence / associativité / moins unaire
//! - règle de signe de '^' (compatibilité, configuration étroite)
//! - domaines numériques => Indefini (jamais d’erreur)
//! - mode d’angle
//! - format (magnitude, idempotence)
//! - entrées mal formées => ErreurCalcul explicite

use std::f64::consts::{E, PI};
use std::time::{Duration, Instant};

use super::erreur::ErreurCalcul;
use super::eval::{ModeAngle, Moteur};
use super::format::{format_resultat, Resultat};

fn eval_ok(expr: &str) -> Resultat {
    Moteur::new()
        .evaluate(expr)
        .unwrap_or_else(|e| panic!("expr={expr:?} err={e}"))
}

fn assert_nombre(expr: &str, attendu: f64) {
    assert_eq!(eval_ok(expr), Resultat::Nombre(attendu), "expr={expr:?}");
}

fn assert_indefini(expr: &str) {
    assert_eq!(eval_ok(expr), Resultat::Indefini, "expr={expr:?}");
}

/// Budget global anti-gel.
fn budget(start: Instant, max: Duration) {
    if start.elapsed() > max {
        panic!("budget temps dépassé: {:?}", max);
    }
}

/* ------------------------ Précédence / associativité ------------------------ */

#[test]
fn sci_precedence() {
    assert_nombre("2+3*4", 14.0);
    assert_nombre("(2+3)*4", 20.0);
    assert_nombre("10-2*3^2", -8.0);
    assert_nombre("7%4*2", 6.0);
}

#[test]
fn sci_associativite() {
    // 2^(3^2), pas (2^3)^2
    assert_nombre("2^3^2", 512.0);
    assert_nombre("(2^3)^2", 64.0);
    // gauche à droite pour - et /
    assert_nombre("10-4-3", 3.0);
    assert_nombre("64/4/2", 8.0);
}

#[test]
fn sci_moins_unaire() {
    assert_nombre("-3+5", 2.0);
    assert_nombre("3*-4", -12.0);
    assert_nombre("2^-1", 0.5);
    assert_nombre("(-3)*(-3)", 9.0);
    assert_nombre("5--2", 7.0);
}

/* ------------------------ Règle de signe '^' ------------------------ */

#[test]
fn sci_regle_de_signe() {
    assert_nombre("(-2)^2", 4.0);
    assert_nombre("-2^2", -4.0);
    assert_nombre("-(2^2)", -4.0);
    assert_nombre("(-2^2)", -4.0);
    assert_nombre("(-3)^3", -27.0);

    // configuration étroite conservée telle quelle
    assert_nombre("((-2)^2)", -4.0);
    assert_nombre("√((-3)^2)", 3.0);
}

/* ------------------------ Domaines numériques ------------------------ */

#[test]
fn sci_division_modulo_par_zero() {
    assert_indefini("5/0");
    assert_indefini("5%0");
    assert_indefini("1+5/0*2");
}

#[test]
fn sci_factorielle_domaine() {
    assert_nombre("0!", 1.0);
    assert_nombre("5!", 120.0);
    assert_nombre("3!!", 720.0);
    assert_indefini("3.5!");
    assert_indefini("(-2)!");
    assert_indefini("171!");
}

#[test]
fn sci_racines_et_logs() {
    assert_nombre("√(2)^2", 2.0);
    assert_nombre("∛(-27)", -3.0);
    assert_indefini("√(-1)");
    assert_nombre("lg(100)+ln(e)", 3.0);
    assert_indefini("lg(0)");
    assert_indefini("ln(-e)");
}

#[test]
fn sci_constantes() {
    assert_nombre("π", format_resultat(PI).valeur().unwrap());
    assert_nombre("e", format_resultat(E).valeur().unwrap());
    assert_nombre("2*π", 6.283185307);
    assert_nombre("1e3+e", 1002.718281828);
}

/* ------------------------ Mode d’angle ------------------------ */

#[test]
fn sci_mode_angle() {
    let mut m = Moteur::new();

    m.set_mode_angle(ModeAngle::Degre);
    assert_eq!(m.evaluate("sin(90)"), Ok(Resultat::Nombre(1.0)));
    assert_eq!(m.evaluate("cos(180)"), Ok(Resultat::Nombre(-1.0)));
    assert_eq!(m.evaluate("tan(45)"), Ok(Resultat::Nombre(1.0)));
    assert_eq!(m.evaluate("cos(90)"), Ok(Resultat::Nombre(0.0)));

    m.set_mode_angle(ModeAngle::Radian);
    assert_eq!(m.evaluate("sin(0)"), Ok(Resultat::Nombre(0.0)));
    assert_eq!(m.evaluate("cos(π)"), Ok(Resultat::Nombre(-1.0)));
    assert_eq!(m.evaluate("cot(0)"), Ok(Resultat::Indefini));
}

/* ------------------------ Format ------------------------ */

#[test]
fn sci_grande_magnitude() {
    // 13 chiffres significatifs au-delà de 10^13
    assert_nombre("123456789*987654321", 121_932_631_112_600_000.0);
    assert_nombre("2^50", 1_125_899_906_843_000.0);
    assert_nombre("10^13", 1e13);
    assert_nombre("20!", 2_432_902_008_177_000_000.0);
}

#[test]
fn sci_format_idempotent_echantillon() {
    for x in [
        0.1 + 0.2,
        -1.0 / 7.0,
        PI * 1e12,
        123_456_789.123_456_789,
        9.999_999_999_5,
        -98_765_432_109_876.5,
        1e300,
        5e-324,
    ] {
        let une = format_resultat(x);
        let v = une.valeur().unwrap();
        assert_eq!(format_resultat(v), une, "x={x}");
    }
}

/* ------------------------ Entrées mal formées ------------------------ */

#[test]
fn sci_entrees_mal_formees() {
    let m = Moteur::new();
    assert_eq!(m.evaluate(""), Err(ErreurCalcul::EntreeVide));
    assert_eq!(m.evaluate("(1+2"), Err(ErreurCalcul::ParenthesesNonFermees));
    assert_eq!(m.evaluate("1+2)"), Err(ErreurCalcul::ParentheseFermante));
    assert_eq!(m.evaluate("+3"), Err(ErreurCalcul::PileVide("+")));
    assert_eq!(m.evaluate("2*"), Err(ErreurCalcul::PileVide("*")));
    assert_eq!(m.evaluate("!3"), Err(ErreurCalcul::PileVide("!")));
    assert_eq!(m.evaluate("2×!3"), Err(ErreurCalcul::PileVide("!")));
    assert_eq!(m.evaluate("2 3"), Err(ErreurCalcul::ExpressionInvalide(2)));
    assert!(matches!(
        m.evaluate("2&3"),
        Err(ErreurCalcul::CaractereInattendu { caractere: '&', .. })
    ));
}

/* ------------------------ Chaînage (résultat réutilisé comme entrée) ------------------------ */

#[test]
fn sci_chainage_resultat() {
    let m = Moteur::new();
    let r = m.evaluate("2-6").unwrap();
    assert_eq!(r.to_string(), "-4");

    let suite = format!("{r}^2");
    assert_eq!(m.evaluate(&suite), Ok(Resultat::Nombre(-16.0)));

    let suite = format!("({r})^2");
    assert_eq!(m.evaluate(&suite), Ok(Resultat::Nombre(16.0)));
}

/* ------------------------ Stress contrôlé ------------------------ */

#[test]
fn sci_stress_somme_longue() {
    let t0 = Instant::now();
    let max = Duration::from_millis(500);

    let mut expr = String::new();
    for k in 0..2000 {
        if k > 0 {
            expr.push('+');
        }
        expr.push_str("0.5");
        budget(t0, max);
    }

    assert_nombre(&expr, 1000.0);
    budget(t0, max);
}

#[test]
fn sci_stress_imbrication_profonde() {
    let t0 = Instant::now();
    let max = Duration::from_millis(500);

    // piles explicites : pas de récursion, pas de risque de débordement
    let n = 5000;
    let expr = format!("{}1{}", "(".repeat(n), ")".repeat(n));
    assert_nombre(&expr, 1.0);

    let expr = format!("{}4{}", "√(".repeat(200), ")".repeat(200));
    assert_nombre(&expr, 1.0);
    budget(t0, max);
}
