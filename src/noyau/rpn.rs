// src/noyau/rpn.rs
//
// Shunting-yard -> RPN
// Objectif:
// - Convertir une suite de Tok en RPN (postfix), évaluable avec une seule pile
//
// Règles:
// - Moins unaire:
//    - '-' en tête, après un opérateur (sauf '!', qui ferme un opérande) ou après '(' :
//      on sort -1 et on empile '*' : "-x" => "-1 x *"
// - Un opérateur dépile le sommet tant que celui-ci a une précédence plus forte,
//   ou égale avec un opérateur entrant associatif à gauche ('^' : strictement plus forte).
// - Les fonctions (sin, √, ...) arrivent toujours suivies de '(' : pas de parenthèse insérée ici.

use super::erreur::ErreurCalcul;
use super::jetons::Tok;
use super::operateurs::{Associativite, Operateur};

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Rpn {
    Num(f64),
    Op {
        op: Operateur,
        /// Contexte retenu pour la règle de signe de '^' (voir eval.rs) :
        /// au moment où '^' sort, le sommet restant est une '(' qui n’a pas été
        /// ouverte par une racine.
        garde_signe: bool,
    },
}

/// Pile de travail des opérateurs.
#[derive(Clone, Copy, Debug)]
enum Pile {
    Op(Operateur),
    LPar,
}

/// Convertit une suite de jetons en RPN (notation polonaise inversée).
///
/// Exemple:
///   tokens: [Num(2), Op(+), Num(3), Op(*), Num(4)]
///   rpn:    [Num(2), Num(3), Num(4), Op(*), Op(+)]
pub fn to_rpn(tokens: &[Tok]) -> Result<Vec<Rpn>, ErreurCalcul> {
    let mut out: Vec<Rpn> = Vec::with_capacity(tokens.len() + 4);
    let mut ops: Vec<Pile> = Vec::new();

    let mut precedent: Option<Tok> = None;

    for &tok in tokens {
        match tok {
            Tok::Num(v) => out.push(Rpn::Num(v)),

            Tok::Op(Operateur::Moins) if est_moins_unaire(precedent) => {
                // pas de négation dédiée : multiplication par -1, empilée sans résolution
                out.push(Rpn::Num(-1.0));
                ops.push(Pile::Op(Operateur::Fois));
            }

            // '!' est postfixé : il lui faut un opérande déjà fermé
            Tok::Op(Operateur::Factorielle) if !ferme_operande(precedent) => {
                return Err(ErreurCalcul::PileVide(Operateur::Factorielle.symbole()));
            }

            Tok::Op(op) => {
                while let Some(Pile::Op(top)) = ops.last().copied() {
                    if !doit_depiler(top, op) {
                        break;
                    }
                    ops.pop();
                    sortir(top, &ops, &mut out);
                }
                ops.push(Pile::Op(op));
            }

            Tok::LPar => ops.push(Pile::LPar),

            Tok::RPar => loop {
                // dépile jusqu’à '(' (qui est jetée)
                match ops.pop() {
                    Some(Pile::Op(top)) => sortir(top, &ops, &mut out),
                    Some(Pile::LPar) => break,
                    None => return Err(ErreurCalcul::ParentheseFermante),
                }
            },
        }

        precedent = Some(tok);
    }

    // vide la pile ops
    while let Some(p) = ops.pop() {
        match p {
            Pile::Op(op) => sortir(op, &ops, &mut out),
            Pile::LPar => return Err(ErreurCalcul::ParenthesesNonFermees),
        }
    }

    Ok(out)
}

fn est_moins_unaire(precedent: Option<Tok>) -> bool {
    match precedent {
        None | Some(Tok::LPar) => true,
        Some(Tok::Op(op)) => op != Operateur::Factorielle,
        Some(Tok::Num(_)) | Some(Tok::RPar) => false,
    }
}

fn ferme_operande(precedent: Option<Tok>) -> bool {
    matches!(
        precedent,
        Some(Tok::Num(_)) | Some(Tok::RPar) | Some(Tok::Op(Operateur::Factorielle))
    )
}

fn doit_depiler(top: Operateur, entrant: Operateur) -> bool {
    let (p_top, p_tok) = (top.precedence(), entrant.precedence());
    p_top > p_tok
        || (p_top == p_tok && entrant.associativite() == Some(Associativite::Gauche))
}

/// Sort `op` vers la sortie; `ops` est la pile APRÈS le pop de `op`.
fn sortir(op: Operateur, ops: &[Pile], out: &mut Vec<Rpn>) {
    let garde_signe = op == Operateur::Puissance
        && matches!(ops.last(), Some(Pile::LPar))
        && !matches!(ops.iter().rev().nth(1), Some(Pile::Op(r)) if r.est_racine());

    out.push(Rpn::Op { op, garde_signe });
}

/// Format utilitaire (démarche) : RPN en texte.
pub fn format_rpn(rpn: &[Rpn]) -> String {
    rpn.iter()
        .map(|r| match r {
            Rpn::Num(v) => format!("{v}"),
            Rpn::Op { op, .. } => op.symbole().to_string(),
        })
        .collect::<Vec<_>>()
        .join(" ")
}
