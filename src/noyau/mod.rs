//! Noyau d’évaluation (f64)
//!
//! Organisation interne :
//! - erreur.rs     : erreurs d’entrée mal formée
//! - operateurs.rs : table précédence / arité / associativité
//! - jetons.rs     : tokenisation (π et e résolus ici)
//! - rpn.rs        : shunting-yard -> RPN
//! - eval.rs       : pile d’opérandes + Moteur (mode d’angle)
//! - format.rs     : arrondi décimal + grandes magnitudes

pub mod erreur;
pub mod eval;
pub mod format;
pub mod jetons;
pub mod operateurs;
pub mod rpn;

#[cfg(test)]
mod tests_scientifiques;

#[cfg(test)]
mod tests_fuzz_safe;

// API publique minimale
pub use erreur::ErreurCalcul;
pub use eval::{Demarche, ModeAngle, Moteur};
pub use format::{format_resultat, Resultat};
