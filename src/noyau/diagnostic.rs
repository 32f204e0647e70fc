// src/noyau/diagnostic.rs

use std::fmt;

use super::position::{span_vers_plage, Plage, Span};

/// Défaut positionné dans le texte (jamais fatal, toujours collecté).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AstError {
    pub plage: Plage,
    pub message: String,
}

impl AstError {
    pub fn new(plage: Plage, message: impl Into<String>) -> Self {
        Self {
            plage,
            message: message.into(),
        }
    }

    /// Construit la plage ligne/colonne à partir d’un span d’offsets.
    pub fn sur_span(texte: &str, span: Span, message: impl Into<String>) -> Self {
        Self::new(span_vers_plage(texte, span), message)
    }
}

impl fmt::Display for AstError {
    /// Affichage humain 1-based : `1:3-1:4 message`
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let d = self.plage.debut;
        let e = self.plage.fin;
        write!(
            f,
            "{}:{}-{}:{} {}",
            d.ligne + 1,
            d.colonne + 1,
            e.ligne + 1,
            e.colonne + 1,
            self.message
        )
    }
}
