// src/noyau/format.rs
//
// Format du résultat brut (f64) :
// 1) non fini (±∞, NaN) => Indefini
// 2) non entier => arrondi à DECIMALES_ARRONDI décimales (bruit binaire), zéros finaux perdus
// 3) |x| > SEUIL_GRAND => CHIFFRES_SIGNIFICATIFS chiffres significatifs
//
// L’arrondi se fait sur la valeur EXACTE du double (BigRational), rendue en texte
// décimal puis relue : même effet que toFixed / toPrecision suivis d’un parseFloat.

use std::fmt;

use num_bigint::BigInt;
use num_rational::BigRational;
use num_traits::Signed;

pub const DECIMALES_ARRONDI: usize = 9;
pub const CHIFFRES_SIGNIFICATIFS: usize = 13;
pub const SEUIL_GRAND: f64 = 1e13;

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Resultat {
    Nombre(f64),
    /// ±∞ ou NaN : division par zéro, hors domaine, débordement...
    Indefini,
}

impl Resultat {
    pub fn valeur(self) -> Option<f64> {
        match self {
            Resultat::Nombre(v) => Some(v),
            Resultat::Indefini => None,
        }
    }
}

impl fmt::Display for Resultat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Resultat::Nombre(v) => write!(f, "{v}"),
            Resultat::Indefini => write!(f, "∞"),
        }
    }
}

pub fn format_resultat(x: f64) -> Resultat {
    if !x.is_finite() {
        return Resultat::Indefini;
    }

    let mut v = x;

    if v.fract() != 0.0 {
        v = arrondi_decimales(v, DECIMALES_ARRONDI);
    }

    if v.abs() > SEUIL_GRAND {
        v = arrondi_significatif(v, CHIFFRES_SIGNIFICATIFS);
    }

    // -0 => 0
    if v == 0.0 {
        v = 0.0;
    }

    Resultat::Nombre(v)
}

/* ------------------------ Décimal (scaled -> texte) ------------------------ */

fn pow10(n: usize) -> BigInt {
    BigInt::from(10).pow(n as u32)
}

/// Convertit un entier “scalé” (×10^digits) en texte décimal.
fn scaled_to_decimal(mut scaled: BigInt, digits: usize) -> String {
    let neg = scaled.is_negative();
    if neg {
        scaled = -scaled;
    }

    let scale = pow10(digits);
    let int_part = &scaled / &scale;
    let frac_part = &scaled % &scale;

    let signe = if neg { "-" } else { "" };

    if digits == 0 {
        return format!("{signe}{int_part}");
    }

    let mut frac = frac_part.to_str_radix(10);
    while frac.len() < digits {
        frac.insert(0, '0');
    }

    format!("{signe}{int_part}.{frac}")
}

/// round(r) (demi loin de zéro) en entier.
fn arrondi_entier(r: BigRational) -> BigInt {
    r.round().to_integer()
}

fn relire(texte: String, defaut: f64) -> f64 {
    texte.parse::<f64>().unwrap_or(defaut)
}

/// x arrondi à `digits` décimales.
fn arrondi_decimales(x: f64, digits: usize) -> f64 {
    let Some(r) = BigRational::from_float(x) else {
        return x;
    };

    let scaled = arrondi_entier(r * BigRational::from_integer(pow10(digits)));
    relire(scaled_to_decimal(scaled, digits), x)
}

/// x arrondi à `chiffres` chiffres significatifs (|x| >= 1 attendu).
fn arrondi_significatif(x: f64, chiffres: usize) -> f64 {
    let Some(r) = BigRational::from_float(x) else {
        return x;
    };

    let n = r.abs().to_integer().to_str_radix(10).len();
    if n <= chiffres {
        return x;
    }

    let echelle = pow10(n - chiffres);
    let m = arrondi_entier(r / BigRational::from_integer(echelle.clone()));
    relire((m * echelle).to_str_radix(10), x)
}
