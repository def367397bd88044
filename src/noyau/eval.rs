//! Noyau — évaluation (pipeline réel)
//!
//! tokenize -> RPN -> pile d’opérandes -> f64 brut -> format_resultat
//!
//! Deux niveaux d’erreur :
//! - domaine numérique (÷0, √ négative, n! hors domaine...) : jamais d’erreur, NaN / ±∞
//!   propagés puis rendus `Resultat::Indefini` par le format ;
//! - entrée mal formée : `ErreurCalcul`.

use std::f64::consts::PI;

use super::erreur::ErreurCalcul;
use super::format::{format_resultat, Resultat};
use super::jetons::{format_tokens, tokenize};
use super::operateurs::{Arite, Operateur};
use super::rpn::{format_rpn, to_rpn, Rpn};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ModeAngle {
    #[default]
    Radian,
    Degre,
}

impl ModeAngle {
    pub fn libelle(self) -> &'static str {
        match self {
            ModeAngle::Radian => "rad",
            ModeAngle::Degre => "deg",
        }
    }
}

#[derive(Default, Clone, Debug)]
pub struct Demarche {
    pub jetons: String,
    pub rpn: String,
    pub brut: String,
    pub mode: String,
}

/// Moteur d’évaluation : ne possède que le mode d’angle.
/// Chaque appel à `evaluate` alloue ses propres piles.
#[derive(Clone, Copy, Debug, Default)]
pub struct Moteur {
    mode: ModeAngle,
}

impl Moteur {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_mode_angle(&mut self, mode: ModeAngle) {
        self.mode = mode;
    }

    pub fn mode_angle(&self) -> ModeAngle {
        self.mode
    }

    /// API publique : évalue une expression complète.
    pub fn evaluate(&self, expr_str: &str) -> Result<Resultat, ErreurCalcul> {
        self.evaluate_detaille(expr_str).map(|(r, _)| r)
    }

    /// Comme `evaluate`, avec la démarche (jetons, RPN, valeur brute, mode).
    pub fn evaluate_detaille(&self, expr_str: &str) -> Result<(Resultat, Demarche), ErreurCalcul> {
        let s = expr_str.trim();
        if s.is_empty() {
            return Err(ErreurCalcul::EntreeVide);
        }

        // 1) Jetons
        let jetons = tokenize(s)?;
        let jetons_txt = format_tokens(&jetons);
        log::debug!("jetons: {jetons_txt}");

        // 2) RPN
        let rpn = to_rpn(&jetons)?;
        let rpn_txt = format_rpn(&rpn);
        log::debug!("rpn: {rpn_txt}");

        // 3) Pile d’opérandes
        let brut = eval_rpn(&rpn, self.mode)?;
        log::debug!("brut: {brut} ({})", self.mode.libelle());

        // 4) Format (précision + magnitude)
        let resultat = format_resultat(brut);

        let d = Demarche {
            jetons: jetons_txt,
            rpn: rpn_txt,
            brut: format!("{brut}"),
            mode: self.mode.libelle().to_string(),
        };

        Ok((resultat, d))
    }
}

/// Évalue une RPN avec une seule pile d’opérandes.
/// Un unaire ne dépile que son opérande droit.
pub fn eval_rpn(rpn: &[Rpn], mode: ModeAngle) -> Result<f64, ErreurCalcul> {
    let mut st: Vec<f64> = Vec::with_capacity(rpn.len());

    for item in rpn {
        match *item {
            Rpn::Num(v) => st.push(v),

            Rpn::Op { op, garde_signe } => {
                let b = st.pop().ok_or(ErreurCalcul::PileVide(op.symbole()))?;
                let a = match op.arite() {
                    Arite::Binaire => st.pop().ok_or(ErreurCalcul::PileVide(op.symbole()))?,
                    Arite::Unaire => 0.0,
                };

                let mut v = appliquer(op, a, b, mode);

                // Règle de compatibilité (PAS une loi mathématique) :
                // '^' appliqué directement dans une '(' non ouverte par √/∛, base négative,
                // exposant pair => le résultat repasse négatif. Ex: "((-2)^2)" = -4, "(-2)^2" = 4.
                if garde_signe && a < 0.0 && b % 2.0 == 0.0 {
                    log::trace!("règle de signe: {a}^{b} = {v} -> {}", -v);
                    v = -v;
                }

                st.push(v);
            }
        }
    }

    if st.len() != 1 {
        return Err(ErreurCalcul::ExpressionInvalide(st.len()));
    }
    st.pop().ok_or(ErreurCalcul::ExpressionInvalide(0))
}

/// Table de calcul (`a` = opérande gauche si binaire, `b` = opérande droit / unique).
fn appliquer(op: Operateur, a: f64, b: f64, mode: ModeAngle) -> f64 {
    let angle = |x: f64| match mode {
        ModeAngle::Radian => x,
        ModeAngle::Degre => x * PI / 180.0,
    };

    match op {
        Operateur::Plus => a + b,
        Operateur::Moins => a - b,
        Operateur::Fois => a * b,
        Operateur::Divise => {
            if b == 0.0 {
                f64::NAN
            } else {
                a / b
            }
        }
        Operateur::Modulo => {
            if b == 0.0 {
                f64::NAN
            } else {
                a % b
            }
        }
        Operateur::Puissance => a.powf(b),

        Operateur::Racine => b.sqrt(),
        // cbrt conserve le signe : ∛(-8) = -2
        Operateur::RacineCubique => b.cbrt(),
        Operateur::Factorielle => factorielle(b),

        Operateur::Lg => b.log10(),
        Operateur::Ln => b.ln(),

        Operateur::Sin => angle(b).sin(),
        Operateur::Cos => angle(b).cos(),
        Operateur::Tan => angle(b).tan(),
        Operateur::Cot => 1.0 / angle(b).tan(),
    }
}

/// n! pour n entier >= 0 ; NaN sinon. S’arrête dès que le produit déborde (∞).
fn factorielle(n: f64) -> f64 {
    if n < 0.0 || n.fract() != 0.0 || !n.is_finite() {
        return f64::NAN;
    }

    let mut acc: f64 = 1.0;
    let mut k = 2.0;
    while k <= n && acc.is_finite() {
        acc *= k;
        k += 1.0;
    }
    acc
}
