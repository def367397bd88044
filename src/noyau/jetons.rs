// src/noyau/jetons.rs

use std::f64::consts::{E, PI};

use super::erreur::ErreurCalcul;
use super::operateurs::{Operateur, FONCTIONS_NOMMEES};

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Tok {
    // Littéral, constantes π / e déjà résolues
    Num(f64),

    Op(Operateur),

    LPar,
    RPar,
}

/// Tokenize une chaîne en jetons.
/// Priorité à chaque position (plus long match d’abord):
/// - nombre : chiffres, point optionnel, suffixe d’exposant optionnel (ex: 2.5e-3)
/// - fonctions nommées : lg ln sin cos tan cot
/// - symbole unique : π e + - * / ^ √ ∛ % ! ( )  (× et ÷ acceptés en alias)
///
/// π et e (constante) sont remplacés tout de suite par leur valeur numérique.
/// Les espaces sont ignorés.
pub fn tokenize(s: &str) -> Result<Vec<Tok>, ErreurCalcul> {
    let mut out = Vec::new();
    let chars: Vec<char> = s.chars().collect();
    let mut i: usize = 0;

    while i < chars.len() {
        let c = chars[i];

        if c.is_whitespace() {
            i += 1;
            continue;
        }

        // Nombre (le suffixe "e3" d’un littéral n’est PAS la constante e)
        if c.is_ascii_digit() {
            let fin = fin_nombre(&chars, i);
            let texte: String = chars[i..fin].iter().collect();
            let v = texte
                .parse::<f64>()
                .map_err(|_| ErreurCalcul::NombreInvalide(texte.clone()))?;
            out.push(Tok::Num(v));
            i = fin;
            continue;
        }

        // Fonctions nommées
        if let Some(op) = FONCTIONS_NOMMEES
            .iter()
            .copied()
            .find(|op| commence_par(&chars[i..], op.symbole()))
        {
            out.push(Tok::Op(op));
            i += op.symbole().len();
            continue;
        }

        let tok = match c {
            'π' => Tok::Num(PI),
            'e' => Tok::Num(E),
            '(' => Tok::LPar,
            ')' => Tok::RPar,
            _ => match Operateur::depuis_caractere(c) {
                Some(op) => Tok::Op(op),
                None => {
                    return Err(ErreurCalcul::CaractereInattendu {
                        caractere: c,
                        position: i,
                    })
                }
            },
        };
        out.push(tok);
        i += 1;
    }

    Ok(out)
}

/// Fin (exclue) du littéral numérique qui commence en `debut`.
fn fin_nombre(chars: &[char], debut: usize) -> usize {
    let chiffres = |mut j: usize| {
        while j < chars.len() && chars[j].is_ascii_digit() {
            j += 1;
        }
        j
    };

    let mut i = chiffres(debut);

    if i < chars.len() && chars[i] == '.' {
        i = chiffres(i + 1);
    }

    // exposant : seulement si des chiffres suivent (sinon 'e' reste la constante)
    if i < chars.len() && (chars[i] == 'e' || chars[i] == 'E') {
        let mut j = i + 1;
        if j < chars.len() && (chars[j] == '+' || chars[j] == '-') {
            j += 1;
        }
        if j < chars.len() && chars[j].is_ascii_digit() {
            i = chiffres(j);
        }
    }

    i
}

fn commence_par(chars: &[char], mot: &str) -> bool {
    let n = mot.chars().count();
    chars.len() >= n && chars.iter().take(n).copied().eq(mot.chars())
}

/// Format utilitaire (debug/“démarche”) : liste de jetons en texte.
pub fn format_tokens(tokens: &[Tok]) -> String {
    let mut out = Vec::new();
    for t in tokens {
        let s = match t {
            Tok::Num(v) => format!("{v}"),
            Tok::Op(op) => op.symbole().to_string(),
            Tok::LPar => "(".to_string(),
            Tok::RPar => ")".to_string(),
        };
        out.push(s);
    }
    out.join(" ")
}
