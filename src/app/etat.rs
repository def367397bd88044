//! src/app/etat.rs
//!
//! État UI (sans vue).
//!
//! Rôle : contenir l’entrée de la calculatrice, n’y ajouter que des symboles
//! syntaxiquement valides, et déléguer le calcul au noyau (`Moteur`).
//!
//! Contrats :
//! - Aucune évaluation ici : `evaluer` passe la chaîne finie au moteur.
//! - Les fonctions (√, sin, ...) sont toujours ajoutées avec leur '('.
//! - Une erreur n’efface pas l’entrée.

use calculatrice_rpn::noyau::{Demarche, ModeAngle, Moteur, Resultat};

/// Longueur maximale de l’entrée (en caractères).
pub const LONGUEUR_MAX: usize = 18;

/// Texte affiché pour un résultat indéfini (remplacé à la saisie suivante).
const MARQUEUR_INDEFINI: &str = "∞";

const OPERATEURS_BINAIRES: [char; 6] = ['+', '-', '×', '÷', '^', '%'];

pub const FONCTIONS: [&str; 8] = ["√", "∛", "lg", "ln", "sin", "cos", "tan", "cot"];

#[derive(Clone, Debug, Default)]
pub struct AppCalc {
    // --- entrée utilisateur ---
    pub entree: String,

    // --- sorties ---
    pub erreur: String,
    pub demarche: Demarche,

    // --- paramètres ---
    pub moteur: Moteur,

    // --- UX ---
    // Le clavier n’est capté qu’après un clic sur l’afficheur.
    pub clavier_actif: bool,
}

impl AppCalc {
    /// Point d’entrée unique : bouton cliqué ou touche clavier.
    pub fn appuyer(&mut self, touche: &str) {
        match touche {
            "C" | "Delete" | "Escape" => self.reset_total(),
            "DEL" | "Backspace" => self.backspace(),
            "=" | "Enter" => self.evaluer(),
            "±" => self.changer_signe(),
            "rad" | "deg" => self.basculer_mode(),
            "*" => self.inserer("×"),
            "/" => self.inserer("÷"),
            t => self.inserer(t),
        }
    }

    /// C : remise à zéro totale (le mode d’angle est conservé).
    pub fn reset_total(&mut self) {
        self.entree.clear();
        self.erreur.clear();
        self.demarche = Demarche::default();
    }

    /// DEL : retire le dernier symbole ("sin(" ou "∞" d’un coup).
    pub fn backspace(&mut self) {
        self.erreur.clear();

        if self.entree == MARQUEUR_INDEFINI {
            self.entree.clear();
            return;
        }

        for f in FONCTIONS {
            let motif = format!("{f}(");
            if self.entree.ends_with(&motif) {
                self.entree.truncate(self.entree.len() - motif.len());
                return;
            }
        }

        self.entree.pop();
    }

    pub fn basculer_mode(&mut self) {
        let mode = match self.moteur.mode_angle() {
            ModeAngle::Radian => ModeAngle::Degre,
            ModeAngle::Degre => ModeAngle::Radian,
        };
        self.moteur.set_mode_angle(mode);
    }

    /// Ajoute `t` seulement s’il est valide à cette position.
    pub fn inserer(&mut self, t: &str) {
        if self.entree == MARQUEUR_INDEFINI {
            self.entree.clear();
        }
        if self.entree.chars().count() >= LONGUEUR_MAX {
            return;
        }

        let ajout = match t {
            "." => {
                if self.attend_operande() {
                    Some("0.".to_string())
                } else if self.finit_par(|c| c.is_ascii_digit())
                    && !self.nombre_final().contains('.')
                    && !self.dans_exposant()
                {
                    Some(".".to_string())
                } else {
                    None
                }
            }
            "-" => (!self.finit_par(|c| c == '-')
                && (self.attend_operande()
                    || self.finit_par_operande()
                    || self.marqueur_exposant()))
            .then(|| t.to_string()),
            "+" => (self.finit_par_operande() || self.marqueur_exposant()).then(|| t.to_string()),
            "×" | "÷" | "^" | "%" => self.finit_par_operande().then(|| t.to_string()),
            "!" => self
                .finit_par(|c| c.is_ascii_digit() || c == '!' || c == ')')
                .then(|| t.to_string()),
            // après un chiffre, 'e' ouvre l’exposant du littéral (2e3)
            "e" => (self.attend_operande()
                || (self.finit_par(|c| c.is_ascii_digit()) && !self.dans_exposant()))
            .then(|| t.to_string()),
            "π" | "(" => self.attend_operande().then(|| t.to_string()),
            ")" => (self.parentheses_ouvertes() > 0 && self.finit_par_operande())
                .then(|| t.to_string()),
            f if FONCTIONS.contains(&f) => self.attend_operande().then(|| format!("{f}(")),
            d if d.len() == 1 && d.chars().all(|c| c.is_ascii_digit()) => {
                (!self.finit_par(|c| matches!(c, 'π' | 'e' | '!' | ')')) || self.marqueur_exposant())
                    .then(|| t.to_string())
            }
            _ => None,
        };

        if let Some(s) = ajout {
            self.erreur.clear();
            self.entree.push_str(&s);
        }
    }

    /// ± : inverse le signe du nombre en fin d’entrée.
    pub fn changer_signe(&mut self) {
        let nombre = self.nombre_final().len();
        if nombre == 0 {
            return;
        }
        let debut = self.entree.len() - nombre;
        let avant = &self.entree[..debut];

        match avant.chars().last() {
            Some('-') => {
                let reste = &avant[..avant.len() - 1];
                if est_position_operande(reste) {
                    // '-' unaire : on le retire
                    self.entree.remove(debut - 1);
                } else {
                    self.entree.replace_range(debut - 1..debut, "+");
                }
            }
            Some('+') => self.entree.replace_range(debut - 1..debut, "-"),
            _ if est_position_operande(avant) => self.entree.insert(debut, '-'),
            _ => {}
        }
    }

    /// = : évalue via le noyau ; le résultat remplace l’entrée (calcul chaîné).
    pub fn evaluer(&mut self) {
        if !self.finit_par_operande() {
            return;
        }

        match self.moteur.evaluate_detaille(&self.entree) {
            Ok((resultat, demarche)) => {
                self.entree = match resultat {
                    Resultat::Nombre(_) => resultat.to_string(),
                    Resultat::Indefini => MARQUEUR_INDEFINI.to_string(),
                };
                self.demarche = demarche;
                self.erreur.clear();
            }
            Err(e) => {
                log::debug!("évaluation refusée: {e}");
                self.erreur = e.to_string();
            }
        }
    }

    /* ------------------------ Règles de position ------------------------ */

    fn finit_par(&self, pred: impl Fn(char) -> bool) -> bool {
        self.entree.chars().last().is_some_and(pred)
    }

    /// Dernier symbole = fin d’opérande (chiffre, constante, '!', ')').
    fn finit_par_operande(&self) -> bool {
        self.finit_par(|c| c.is_ascii_digit() || matches!(c, 'π' | 'e' | '!' | ')'))
            && !self.marqueur_exposant()
    }

    /// 'e' juste après un chiffre : exposant encore sans chiffres ("2e").
    fn marqueur_exposant(&self) -> bool {
        let mut fin = self.entree.chars().rev();
        fin.next() == Some('e') && fin.next().is_some_and(|c| c.is_ascii_digit())
    }

    /// La fin d’entrée est dans l’exposant d’un littéral ("2e", "2e-", "2e-3").
    fn dans_exposant(&self) -> bool {
        let c: Vec<char> = self.entree.chars().collect();
        let mut i = c.len();
        while i > 0 && c[i - 1].is_ascii_digit() {
            i -= 1;
        }
        if i > 0 && matches!(c[i - 1], '+' | '-') {
            i -= 1;
        }
        i > 1 && c[i - 1] == 'e' && c[i - 2].is_ascii_digit()
    }

    /// Position où un opérande (ou une fonction) peut commencer.
    fn attend_operande(&self) -> bool {
        est_position_operande(&self.entree)
    }

    fn parentheses_ouvertes(&self) -> usize {
        let ouvertes = self.entree.matches('(').count();
        let fermees = self.entree.matches(')').count();
        ouvertes.saturating_sub(fermees)
    }

    /// Chiffres et point en fin d’entrée.
    fn nombre_final(&self) -> &str {
        let debut = self
            .entree
            .rfind(|c: char| !(c.is_ascii_digit() || c == '.'))
            .map_or(0, |i| i + self.entree[i..].chars().next().map_or(1, char::len_utf8));
        &self.entree[debut..]
    }
}

fn est_position_operande(s: &str) -> bool {
    match s.chars().last() {
        None => true,
        Some(c) => c == '(' || OPERATEURS_BINAIRES.contains(&c),
    }
}
