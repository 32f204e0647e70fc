// src/app/vue.rs
//
// Vue (UI egui) — natif + web
// ---------------------------
// Objectifs :
// - Même AppCalc (etat.rs) pour natif + wasm
// - Éditeur multiligne : chaque frappe relance l’analyse (texte complet)
// - Coloration : préfixe reconnu normal, suffixe rejeté souligné en rouge
// - Tactile : gros boutons, focus redonné après clic (focus_entree)

use std::sync::Arc;

use eframe::egui;

use super::etat::AppCalc;
use crate::noyau::analyse::{Classe, Segment};
use crate::noyau::fonctions::FONCTIONS;

impl AppCalc {
    /// UI principale : à appeler depuis eframe::App::update(...)
    pub fn ui(&mut self, ui: &mut egui::Ui) {
        // Densité “calc”
        ui.spacing_mut().item_spacing = egui::vec2(6.0, 6.0);

        egui::ScrollArea::vertical()
            .auto_shrink([false, false])
            .show(ui, |ui| {
                ui.heading("Calculatrice — diagnostics");
                ui.add_space(6.0);

                self.ui_entree(ui);

                ui.add_space(8.0);
                ui.separator();
                ui.add_space(8.0);

                self.ui_resultats(ui);

                ui.add_space(8.0);
                ui.separator();
                ui.add_space(8.0);

                self.ui_demarche(ui);
            });
    }

    fn ui_entree(&mut self, ui: &mut egui::Ui) {
        ui.label("Entrée :");

        // segments de la dernière analyse publiée ; le texte peut avoir
        // une frappe d’avance, colorer() borne les spans
        let segments = self.apercu.segments.clone();
        let mut layouter = |ui: &egui::Ui, buf: &dyn egui::TextBuffer, largeur: f32| {
            colorer(ui, buf.as_str(), &segments, largeur)
        };

        // IMPORTANT : id stable + focus contrôlé
        let resp = ui.add(
            egui::TextEdit::multiline(&mut self.entree)
                .desired_width(ui.available_width())
                .desired_rows(3)
                .hint_text("Ex: 1 + 2*-sqrt(4), log(10)/(2-2)")
                .id_salt("entree_edit")
                .code_editor()
                .layouter(&mut layouter),
        );

        if resp.changed() {
            self.actualiser();
        }

        // Si on a cliqué un bouton, on redonne le focus
        if self.focus_entree {
            resp.request_focus();
            self.focus_entree = false;
        }

        ui.add_space(6.0);

        self.ui_completion(ui);

        ui.add_space(6.0);

        // Actions
        ui.horizontal(|ui| {
            // Contrat: C = entrée seulement ; AC = tout (document rouvert)
            self.bouton_action(ui, "C", "Efface l’entrée", Action::ClearEntree);
            self.bouton_action(ui, "AC", "Remise à zéro totale", Action::ResetTotal);
            self.bouton_action(ui, "DEL", "Efface le dernier symbole", Action::Backspace);
        });

        ui.add_space(8.0);

        // Touches rapides
        ui.horizontal_wrapped(|ui| {
            for symbole in ["(", ")", "+", "-", "*", "/"] {
                self.bouton_insert(ui, symbole, symbole);
            }

            ui.separator();

            for f in FONCTIONS.iter() {
                self.bouton_insert(ui, f.nom, &format!("{}(", f.nom));
            }
        });

        ui.add_space(8.0);

        // Pavé numérique
        self.ui_pave_numerique(ui);
    }

    /// Bandeau de suggestions pour le mot en cours (vide si rien ne correspond).
    fn ui_completion(&mut self, ui: &mut egui::Ui) {
        let suggestions = self.suggestions();
        // aucun mot en cours (tout correspond) ou rien ne correspond
        if suggestions.is_empty() || suggestions.len() == FONCTIONS.len() {
            return;
        }

        ui.horizontal_wrapped(|ui| {
            ui.label("Suggestions :");
            for s in &suggestions {
                let resp = ui.button(s.libelle).on_hover_text(s.detail);
                if resp.clicked() {
                    self.accepter_suggestion(s);
                }
            }
        });
    }

    fn ui_pave_numerique(&mut self, ui: &mut egui::Ui) {
        egui::Grid::new("pave_numerique")
            .num_columns(3)
            .spacing([6.0, 6.0])
            .show(ui, |ui| {
                for ligne in [["7", "8", "9"], ["4", "5", "6"], ["1", "2", "3"], ["0", ".", " "]] {
                    for touche in ligne {
                        let label = if touche == " " { "␣" } else { touche };
                        self.bouton_insert(ui, label, touche);
                    }
                    ui.end_row();
                }
            });
    }

    fn ui_resultats(&mut self, ui: &mut egui::Ui) {
        ui.label("Valeur :");
        match &self.apercu.valeur {
            Some(v) => Self::champ_monospace(ui, "valeur_out", v, 1),
            None => {
                ui.monospace("indisponible");
            }
        }

        ui.add_space(6.0);

        ui.label("Diagnostics :");
        if self.apercu.diagnostics.is_empty() {
            ui.monospace("aucun");
        } else {
            let couleur = ui.visuals().error_fg_color;
            for d in &self.apercu.diagnostics {
                ui.colored_label(couleur, egui::RichText::new(d).monospace());
            }
        }
    }

    fn ui_demarche(&mut self, ui: &mut egui::Ui) {
        egui::CollapsingHeader::new("Démarche")
            .default_open(true)
            .show(ui, |ui| {
                ui.label("Arbre (notation préfixe) :");
                Self::champ_monospace(ui, "demarche_ast", &self.apercu.demarche, 2);
            });
    }

    fn champ_monospace(ui: &mut egui::Ui, id: &str, contenu: &str, rows: usize) {
        // Affichage lecture seule “stable”, sans TextEdit interactif.
        egui::Frame::group(ui.style())
            .fill(ui.visuals().extreme_bg_color)
            .show(ui, |ui| {
                ui.push_id(id, |ui| {
                    ui.set_min_width(ui.available_width());
                    ui.set_min_height(
                        rows as f32 * ui.text_style_height(&egui::TextStyle::Monospace),
                    );
                    ui.monospace(contenu);
                });
            });
    }

    fn bouton_action(&mut self, ui: &mut egui::Ui, label: &str, tip: &str, action: Action) {
        let resp = ui
            .add_sized([56.0, 30.0], egui::Button::new(label))
            .on_hover_text(tip);

        if resp.clicked() {
            match action {
                Action::ClearEntree => self.clear_entree(),
                Action::ResetTotal => self.reset_total(),
                Action::Backspace => self.backspace_entree(),
            }
        }
    }

    fn bouton_insert(&mut self, ui: &mut egui::Ui, label: &str, fragment: &str) {
        let resp = ui.add_sized([46.0, 28.0], egui::Button::new(label));
        if resp.clicked() {
            self.inserer(fragment);
        }
    }
}

/// Mise en forme de l’éditeur d’après les segments publiés (pas de re-parse).
fn colorer(ui: &egui::Ui, texte: &str, segments: &[Segment], largeur: f32) -> Arc<egui::Galley> {
    let police = egui::TextStyle::Monospace.resolve(ui.style());
    let normal = egui::TextFormat::simple(police.clone(), ui.visuals().text_color());
    let rouge = ui.visuals().error_fg_color;
    let rejete = egui::TextFormat {
        font_id: police,
        color: rouge,
        underline: egui::Stroke::new(1.0, rouge),
        ..Default::default()
    };

    let mut job = egui::text::LayoutJob::default();
    let mut couvert = 0;
    for segment in segments {
        let format = match segment.classe {
            Classe::Reconnu => normal.clone(),
            Classe::Rejete => rejete.clone(),
        };
        let morceau = segment.span.extrait(texte);
        job.append(morceau, 0.0, format);
        if !morceau.is_empty() {
            couvert = segment.span.fin;
        }
    }
    // reste non couvert (segments d’une frappe en retard)
    if let Some(reste) = texte.get(couvert..).filter(|r| !r.is_empty()) {
        job.append(reste, 0.0, normal);
    }
    job.wrap.max_width = largeur;

    ui.painter().layout_job(job)
}

#[derive(Clone, Copy, Debug)]
enum Action {
    ClearEntree,
    ResetTotal,
    Backspace,
}
