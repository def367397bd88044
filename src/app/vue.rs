// src/app/vue.rs
//
// Vue (UI egui) — natif + web
// ---------------------------
// Objectifs :
// - Même AppCalc (etat.rs) pour natif + wasm
// - Un clic sur l’afficheur active/désactive la capture clavier
// - Tactile : gros boutons, une seule entrée d’action (AppCalc::appuyer)

use eframe::egui;

use super::etat::AppCalc;

/// Pavé principal (4 colonnes).
const PAVE: [[&str; 4]; 6] = [
    ["C", "DEL", "±", "÷"],
    ["7", "8", "9", "×"],
    ["4", "5", "6", "-"],
    ["1", "2", "3", "+"],
    ["0", ".", "%", "^"],
    ["(", ")", "!", "="],
];

/// Constantes + fonctions.
const SCIENTIFIQUE: [[&str; 5]; 2] = [["π", "e", "√", "∛", "lg"], ["ln", "sin", "cos", "tan", "cot"]];

impl AppCalc {
    /// UI principale : à appeler depuis eframe::App::update(...)
    pub fn ui(&mut self, ui: &mut egui::Ui) {
        // Densité “calc”
        ui.spacing_mut().item_spacing = egui::vec2(6.0, 6.0);

        if self.clavier_actif {
            self.lire_clavier(ui);
        }

        egui::ScrollArea::vertical()
            .auto_shrink([false, false])
            .show(ui, |ui| {
                ui.heading("Calculatrice RPN");
                ui.add_space(6.0);

                self.ui_afficheur(ui);

                ui.add_space(8.0);
                self.ui_scientifique(ui);

                ui.add_space(8.0);
                self.ui_pave(ui);

                ui.add_space(8.0);
                ui.separator();
                ui.add_space(8.0);

                self.ui_demarche(ui);
            });
    }

    fn ui_afficheur(&mut self, ui: &mut egui::Ui) {
        let texte = if self.entree.is_empty() {
            "0"
        } else {
            self.entree.as_str()
        };

        let resp = egui::Frame::group(ui.style())
            .fill(ui.visuals().extreme_bg_color)
            .show(ui, |ui| {
                ui.set_min_width(ui.available_width());
                ui.label(egui::RichText::new(texte).monospace().size(28.0));
            })
            .response
            .interact(egui::Sense::click())
            .on_hover_text("Clic : active/désactive le clavier");

        if resp.clicked() {
            self.clavier_actif = !self.clavier_actif;
        }

        ui.horizontal(|ui| {
            let mode = self.moteur.mode_angle().libelle();
            if ui
                .add_sized([56.0, 28.0], egui::Button::new(mode))
                .on_hover_text("Radians / degrés")
                .clicked()
            {
                self.appuyer(mode);
            }

            if self.clavier_actif {
                ui.label("clavier actif");
            }
        });

        if !self.erreur.is_empty() {
            ui.colored_label(ui.visuals().error_fg_color, &self.erreur);
        }
    }

    fn ui_scientifique(&mut self, ui: &mut egui::Ui) {
        egui::Grid::new("pave_scientifique")
            .num_columns(5)
            .spacing([6.0, 6.0])
            .show(ui, |ui| {
                for ligne in SCIENTIFIQUE {
                    for touche in ligne {
                        self.bouton(ui, touche);
                    }
                    ui.end_row();
                }
            });
    }

    fn ui_pave(&mut self, ui: &mut egui::Ui) {
        egui::Grid::new("pave_numerique")
            .num_columns(4)
            .spacing([6.0, 6.0])
            .show(ui, |ui| {
                for ligne in PAVE {
                    for touche in ligne {
                        self.bouton(ui, touche);
                    }
                    ui.end_row();
                }
            });
    }

    fn bouton(&mut self, ui: &mut egui::Ui, touche: &str) {
        if ui
            .add_sized([56.0, 36.0], egui::Button::new(touche))
            .clicked()
        {
            self.appuyer(touche);
        }
    }

    /// Texte tapé + touches d’action, quand la capture est active.
    fn lire_clavier(&mut self, ui: &mut egui::Ui) {
        let mut touches: Vec<String> = Vec::new();

        ui.input(|i| {
            for ev in &i.events {
                match ev {
                    egui::Event::Text(t) => touches.extend(t.chars().map(String::from)),
                    egui::Event::Key {
                        key, pressed: true, ..
                    } => match key {
                        egui::Key::Enter => touches.push("Enter".into()),
                        egui::Key::Backspace => touches.push("Backspace".into()),
                        egui::Key::Delete => touches.push("Delete".into()),
                        egui::Key::Escape => touches.push("Escape".into()),
                        _ => {}
                    },
                    _ => {}
                }
            }
        });

        for t in touches {
            self.appuyer(&t);
        }
    }

    fn ui_demarche(&mut self, ui: &mut egui::Ui) {
        egui::CollapsingHeader::new("Démarche")
            .default_open(false)
            .show(ui, |ui| {
                Self::champ_demarche(ui, "Jetons", "demarche_jetons", &self.demarche.jetons);
                Self::champ_demarche(ui, "RPN", "demarche_rpn", &self.demarche.rpn);
                Self::champ_demarche(ui, "Brut", "demarche_brut", &self.demarche.brut);
                Self::champ_demarche(ui, "Mode", "demarche_mode", &self.demarche.mode);
            });
    }

    fn champ_demarche(ui: &mut egui::Ui, titre: &str, id: &str, contenu: &str) {
        ui.add_space(4.0);
        ui.label(format!("{titre} :"));
        // Affichage lecture seule “stable”, sans TextEdit interactif.
        egui::Frame::group(ui.style())
            .fill(ui.visuals().extreme_bg_color)
            .show(ui, |ui| {
                ui.push_id(id, |ui| {
                    ui.set_min_width(ui.available_width());
                    ui.monospace(contenu);
                });
            });
    }
}
