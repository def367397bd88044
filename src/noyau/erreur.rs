// src/noyau/erreur.rs
//
// Erreurs d’entrée mal formée (tier "malformed input").
// Les erreurs de domaine numérique (÷0, √ négative, n! hors domaine) ne passent
// JAMAIS par ici : elles restent des NaN / ±∞ et deviennent Resultat::Indefini.

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ErreurCalcul {
    #[error("Entrée vide")]
    EntreeVide,

    #[error("caractère inattendu: '{caractere}' (position {position})")]
    CaractereInattendu { caractere: char, position: usize },

    #[error("nombre invalide: {0}")]
    NombreInvalide(String),

    #[error("parenthèse fermante sans ouvrante")]
    ParentheseFermante,

    #[error("parenthèses non fermées")]
    ParenthesesNonFermees,

    /// Pile d’opérandes vide au moment d’appliquer l’opérateur.
    #[error("opérande manquant pour « {0} »")]
    PileVide(&'static str),

    /// La pile finale doit contenir exactement une valeur.
    #[error("expression invalide ({0} valeurs restantes)")]
    ExpressionInvalide(usize),
}
