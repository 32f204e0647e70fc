//! Noyau — session de documents
//!
//! uri -> dernier état analysé. Synchronisation “texte complet” : chaque
//! ouverture / modification relance parse + analyse sur tout le texte.
//!
//! Concurrence : la table est derrière un `Mutex` ; chaque opération le prend
//! une seule fois, donc open/change/close sur un même uri sont sérialisés.
//! L’analyse elle-même reste pure (texte possédé, aucun état partagé).

use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};

use thiserror::Error;
use tracing::{debug, info, warn};

use super::analyse::{analyser, classifier, ResultatAnalyse, Segment};
use super::completion::{suggerer, Suggestion};
use super::diagnostic::AstError;
use super::grammaire::{parse, IssueParse};
use super::position::{span_vers_plage, Position, Span};

/// Étiquette `source` des diagnostics publiés.
pub const SOURCE_DIAGNOSTIC: &str = "calculator";

pub const MSG_CARACTERES_INATTENDUS: &str = "Invalid expression: unexpected characters";

#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum ErreurSession {
    #[error("unknown document: {0}")]
    DocumentInconnu(String),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Severite {
    Erreur,
}

/// Diagnostic tel que publié vers l’extérieur.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DiagnosticPublie {
    pub erreur: AstError,
    pub severite: Severite,
    pub source: &'static str,
}

impl From<AstError> for DiagnosticPublie {
    fn from(erreur: AstError) -> Self {
        Self {
            erreur,
            severite: Severite::Erreur,
            source: SOURCE_DIAGNOSTIC,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct EtatDocument {
    pub uri: String,
    pub contenu: String,
    pub parse: IssueParse,
    pub analyse: ResultatAnalyse,
}

impl EtatDocument {
    fn construire(uri: &str, contenu: String) -> Self {
        let p = parse(&contenu);
        let analyse = analyser(&contenu, &p);
        let issue = p.issue;
        Self {
            uri: uri.to_string(),
            contenu,
            parse: issue,
            analyse,
        }
    }

    /// Diagnostic de parse (éventuel) puis diagnostics d’analyse.
    pub fn diagnostics(&self) -> Vec<DiagnosticPublie> {
        let mut out: Vec<DiagnosticPublie> = Vec::new();
        if let Some(e) = diagnostic_de_parse(&self.contenu, &self.parse) {
            out.push(e.into());
        }
        out.extend(self.analyse.erreurs.iter().cloned().map(DiagnosticPublie::from));
        out
    }
}

/// Reste non consommé `[consomme, total)` ; un échec a `consomme = 0`,
/// donc tout le texte est signalé.
pub fn diagnostic_de_parse(texte: &str, issue: &IssueParse) -> Option<AstError> {
    if issue.consomme >= issue.total {
        return None;
    }
    let span = Span::new(issue.consomme, issue.total);

    let mut message = MSG_CARACTERES_INATTENDUS.to_string();
    if !issue.attendu.is_empty() {
        message.push_str(" Expected: ");
        message.push_str(&issue.attendu.join(", "));
    }

    Some(AstError::new(span_vers_plage(texte, span), message))
}

#[derive(Debug, Default)]
pub struct Session {
    documents: Mutex<HashMap<String, EtatDocument>>,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    fn table(&self) -> MutexGuard<'_, HashMap<String, EtatDocument>> {
        // un panic pendant une analyse ne doit pas bloquer toute la session
        self.documents
            .lock()
            .unwrap_or_else(|empoisonne| empoisonne.into_inner())
    }

    pub fn ouvrir(&self, uri: &str, texte: impl Into<String>) -> Vec<DiagnosticPublie> {
        info!(uri, "ouverture");
        self.publier(uri, texte.into())
    }

    /// Nouveau texte complet ; un uri inconnu est simplement ouvert.
    pub fn changer(&self, uri: &str, texte: impl Into<String>) -> Vec<DiagnosticPublie> {
        debug!(uri, "modification");
        self.publier(uri, texte.into())
    }

    pub fn fermer(&self, uri: &str) -> Result<(), ErreurSession> {
        match self.table().remove(uri) {
            Some(_) => {
                info!(uri, "fermeture");
                Ok(())
            }
            None => {
                warn!(uri, "fermeture d’un document inconnu");
                Err(ErreurSession::DocumentInconnu(uri.to_string()))
            }
        }
    }

    pub fn etat(&self, uri: &str) -> Result<EtatDocument, ErreurSession> {
        self.table()
            .get(uri)
            .cloned()
            .ok_or_else(|| ErreurSession::DocumentInconnu(uri.to_string()))
    }

    pub fn nombre_documents(&self) -> usize {
        self.table().len()
    }

    pub fn completion(
        &self,
        uri: &str,
        position: Position,
    ) -> Result<Vec<Suggestion>, ErreurSession> {
        let table = self.table();
        let etat = table
            .get(uri)
            .ok_or_else(|| ErreurSession::DocumentInconnu(uri.to_string()))?;
        Ok(suggerer(&etat.contenu, position))
    }

    /// Coloration préfixe reconnu / suffixe rejeté du document.
    pub fn jetons_semantiques(&self, uri: &str) -> Result<Vec<Segment>, ErreurSession> {
        let table = self.table();
        let etat = table
            .get(uri)
            .ok_or_else(|| ErreurSession::DocumentInconnu(uri.to_string()))?;
        Ok(classifier(&etat.parse))
    }

    fn publier(&self, uri: &str, texte: String) -> Vec<DiagnosticPublie> {
        // analyse hors verrou : seule l’insertion est sérialisée
        let etat = EtatDocument::construire(uri, texte);
        let diagnostics = etat.diagnostics();
        debug!(uri, diagnostics = diagnostics.len(), "publication");
        self.table().insert(uri.to_string(), etat);
        diagnostics
    }
}
