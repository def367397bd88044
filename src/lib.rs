//! Calculatrice RPN — noyau d’évaluation.
//!
//! L’application (src/main.rs) n’est qu’un appelant : elle compose la chaîne
//! et affiche ce que `Moteur::evaluate` renvoie.

pub mod noyau;

pub use noyau::{ErreurCalcul, ModeAngle, Moteur, Resultat};
