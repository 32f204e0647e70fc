//! src/app/etat.rs
//!
//! État UI (sans vue).
//!
//! Rôle : contenir l’entrée, la session d’analyse (un seul document) et le
//! dernier aperçu publié (valeur, diagnostics, démarche), plus les actions
//! simples (C / AC / DEL / insertions) sans logique d’affichage.
//!
//! Contrats :
//! - Toute modification de l’entrée repasse par `actualiser()` (texte complet).
//! - L’aperçu reflète toujours le dernier texte envoyé à la session.

use tracing::warn;

use crate::noyau::analyse::Segment;
use crate::noyau::completion::{mot_courant, suggerer_a_offset, Suggestion};
use crate::noyau::format::{format_ast, format_valeur};
use crate::noyau::Session;

/// Document unique édité par l’interface.
pub const URI_SAISIE: &str = "saisie://entree";

/// Motifs retirés d’un bloc par DEL.
const MOTIFS_DEL: [&str; 5] = ["sqrt(", "sin(", "cos(", "tan(", "log("];

#[derive(Clone, Default, Debug, PartialEq)]
pub struct Apercu {
    /// Valeur formatée ; `None` => « indisponible ».
    pub valeur: Option<String>,
    /// Une ligne par diagnostic publié (`l:c-l:c message`, 1-based).
    pub diagnostics: Vec<String>,
    /// AST en notation préfixe (vide si pas d’AST).
    pub demarche: String,
    /// Préfixe reconnu / suffixe rejeté, pour colorer l’éditeur.
    pub segments: Vec<Segment>,
}

#[derive(Debug)]
pub struct AppCalc {
    // --- entrée utilisateur ---
    pub entree: String,

    // --- analyse ---
    pub session: Session,
    pub apercu: Apercu,

    // --- UX ---
    // Permet à vue.rs de redonner le focus à l’entrée après un clic sur un bouton.
    pub focus_entree: bool,
}

impl Default for AppCalc {
    fn default() -> Self {
        let session = Session::new();
        session.ouvrir(URI_SAISIE, "");
        Self {
            entree: String::new(),
            session,
            apercu: Apercu::default(),
            focus_entree: true, // au lancement, on veut pouvoir taper tout de suite
        }
    }
}

impl AppCalc {
    /* ------------------------ Synchronisation avec la session ------------------------ */

    /// Envoie le texte complet à la session et relit l’état publié.
    pub fn actualiser(&mut self) {
        let publies = self.session.changer(URI_SAISIE, self.entree.clone());

        let (etat, segments) = match (
            self.session.etat(URI_SAISIE),
            self.session.jetons_semantiques(URI_SAISIE),
        ) {
            (Ok(etat), Ok(segments)) => (etat, segments),
            (Err(e), _) | (_, Err(e)) => {
                warn!(erreur = %e, "état introuvable après modification");
                self.apercu = Apercu::default();
                return;
            }
        };

        self.apercu = Apercu {
            valeur: etat.analyse.valeur.map(format_valeur),
            diagnostics: publies.iter().map(|d| d.erreur.to_string()).collect(),
            demarche: etat
                .analyse
                .ast
                .as_ref()
                .map(|ast| format_ast(ast, &etat.contenu))
                .unwrap_or_default(),
            segments,
        };
    }

    /// Suggestions pour le mot en fin d’entrée.
    pub fn suggestions(&self) -> Vec<Suggestion> {
        suggerer_a_offset(&self.entree, self.entree.len())
    }

    /* ------------------------ Actions “boutons” ------------------------ */

    /// AC : remise à zéro totale (document refermé puis rouvert à vide).
    pub fn reset_total(&mut self) {
        if let Err(e) = self.session.fermer(URI_SAISIE) {
            warn!(erreur = %e, "remise à zéro");
        }
        self.session.ouvrir(URI_SAISIE, "");
        self.entree.clear();
        self.apercu = Apercu::default();
        self.focus_entree = true;
    }

    /// C : effacer l’entrée (l’aperçu suit).
    pub fn clear_entree(&mut self) {
        self.entree.clear();
        self.actualiser();
        self.focus_entree = true;
    }

    /// DEL : retire d’un coup un appel ouvert (`sin(`…), sinon un caractère.
    pub fn backspace_entree(&mut self) {
        while self.entree.ends_with(' ') {
            self.entree.pop();
        }

        match MOTIFS_DEL.into_iter().find(|m| self.entree.ends_with(m)) {
            Some(m) => self.entree.truncate(self.entree.len() - m.len()),
            None => {
                self.entree.pop();
            }
        }

        self.actualiser();
        self.focus_entree = true;
    }

    /// Ajoute un fragment en fin d’entrée.
    pub fn inserer(&mut self, fragment: &str) {
        self.entree.push_str(fragment);
        self.actualiser();
        self.focus_entree = true;
    }

    /// Remplace le mot en cours par `nom(`.
    pub fn accepter_suggestion(&mut self, suggestion: &Suggestion) {
        let mot = mot_courant(&self.entree, self.entree.len()).len();
        self.entree.truncate(self.entree.len() - mot);
        self.entree.push_str(suggestion.libelle);
        self.entree.push('(');
        self.actualiser();
        self.focus_entree = true;
    }
}
