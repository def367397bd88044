// src/noyau/operateurs.rs
//
// Table des opérateurs (enum fermé) : précédence, arité, associativité.
// Une seule entrée par symbole ; le `match` exhaustif remplace la table à clés texte.

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Arite {
    Unaire,
    Binaire,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Associativite {
    Gauche,
    Droite,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Operateur {
    Plus,
    Moins,
    Fois,
    Divise,
    Modulo,
    Puissance,

    Racine,        // √
    RacineCubique, // ∛
    Factorielle,   // ! (postfixé)

    Lg,
    Ln,
    Sin,
    Cos,
    Tan,
    Cot,
}

/// Fonctions nommées reconnues par le tokenizer (multi-caractères).
pub const FONCTIONS_NOMMEES: [Operateur; 6] = [
    Operateur::Lg,
    Operateur::Ln,
    Operateur::Sin,
    Operateur::Cos,
    Operateur::Tan,
    Operateur::Cot,
];

impl Operateur {
    pub fn symbole(self) -> &'static str {
        match self {
            Operateur::Plus => "+",
            Operateur::Moins => "-",
            Operateur::Fois => "*",
            Operateur::Divise => "/",
            Operateur::Modulo => "%",
            Operateur::Puissance => "^",
            Operateur::Racine => "√",
            Operateur::RacineCubique => "∛",
            Operateur::Factorielle => "!",
            Operateur::Lg => "lg",
            Operateur::Ln => "ln",
            Operateur::Sin => "sin",
            Operateur::Cos => "cos",
            Operateur::Tan => "tan",
            Operateur::Cot => "cot",
        }
    }

    /// Symboles d’un caractère (× et ÷ : glyphes d’affichage acceptés en alias).
    pub fn depuis_caractere(c: char) -> Option<Operateur> {
        let op = match c {
            '+' => Operateur::Plus,
            '-' => Operateur::Moins,
            '*' | '×' => Operateur::Fois,
            '/' | '÷' => Operateur::Divise,
            '%' => Operateur::Modulo,
            '^' => Operateur::Puissance,
            '√' => Operateur::Racine,
            '∛' => Operateur::RacineCubique,
            '!' => Operateur::Factorielle,
            _ => return None,
        };
        Some(op)
    }

    pub fn precedence(self) -> u8 {
        match self {
            Operateur::Plus | Operateur::Moins => 1,
            Operateur::Fois | Operateur::Divise | Operateur::Modulo => 2,
            Operateur::Puissance => 3,
            Operateur::Racine
            | Operateur::RacineCubique
            | Operateur::Factorielle
            | Operateur::Lg
            | Operateur::Ln
            | Operateur::Sin
            | Operateur::Cos
            | Operateur::Tan
            | Operateur::Cot => 4,
        }
    }

    pub fn arite(self) -> Arite {
        if self.precedence() == 4 {
            Arite::Unaire
        } else {
            Arite::Binaire
        }
    }

    /// None pour les unaires : ils ne consomment que leur opérande droit.
    pub fn associativite(self) -> Option<Associativite> {
        match self {
            Operateur::Puissance => Some(Associativite::Droite),
            _ if self.arite() == Arite::Binaire => Some(Associativite::Gauche),
            _ => None,
        }
    }

    pub fn est_racine(self) -> bool {
        matches!(self, Operateur::Racine | Operateur::RacineCubique)
    }
}
