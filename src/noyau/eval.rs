//! Noyau — évaluation de l’AST sémantique (f64)
//!
//! Contrat :
//! - `Some(v)` si tout le sous-arbre visité est sain ;
//! - sinon `None`, et CHAQUE défaut rencontré est ajouté à `erreurs`
//!   (pas seulement le premier), une seule fois, au jeton le plus précis.
//! - un `None` remonte sans être ré-annoncé par les ancêtres.
//!
//! Pas de cas spéciaux NaN/∞ : seules les gardes explicites (÷0, √ négatif,
//! log ≤ 0) produisent des diagnostics.

use super::diagnostic::AstError;
use super::expr::{Expr, OpBinaire, OpUnaire};
use super::fonctions::cherche_fonction;
use super::position::Span;

pub const MSG_NOMBRE_ILLISIBLE: &str = "cannot parse number";
pub const MSG_DIVISION_PAR_ZERO: &str = "division by zero";
pub const MSG_FONCTION_INCONNUE: &str = "unknown function";

/// Évalue `expr` ; `texte` sert à relire les littéraux et à positionner les diagnostics.
pub fn evaluer(expr: &Expr, texte: &str, erreurs: &mut Vec<AstError>) -> Option<f64> {
    match expr {
        Expr::Nombre(span) => lire_nombre(*span, texte, erreurs),

        Expr::Unaire { op, operande, .. } => {
            let x = evaluer(operande, texte, erreurs)?;
            Some(match op {
                OpUnaire::Negation => -x,
                OpUnaire::Identite => x,
            })
        }

        Expr::Appel {
            nom,
            span,
            argument,
        } => {
            let x = evaluer(argument, texte, erreurs)?;
            evaluer_fonction(nom, x, *span, texte, erreurs)
        }

        Expr::Binaire {
            op,
            span,
            gauche,
            droite,
        } => {
            // les deux côtés sont visités : leurs défauts sont tous rapportés
            let a = evaluer(gauche, texte, erreurs);
            let b = evaluer(droite, texte, erreurs);
            let (a, b) = (a?, b?);
            evaluer_binaire(*op, a, b, *span, texte, erreurs)
        }
    }
}

fn lire_nombre(span: Span, texte: &str, erreurs: &mut Vec<AstError>) -> Option<f64> {
    match span.extrait(texte).parse::<f64>() {
        Ok(v) => Some(v),
        Err(_) => {
            erreurs.push(AstError::sur_span(texte, span, MSG_NOMBRE_ILLISIBLE));
            None
        }
    }
}

fn evaluer_binaire(
    op: OpBinaire,
    a: f64,
    b: f64,
    span: Span,
    texte: &str,
    erreurs: &mut Vec<AstError>,
) -> Option<f64> {
    match op {
        OpBinaire::Add => Some(a + b),
        OpBinaire::Sub => Some(a - b),
        OpBinaire::Mul => Some(a * b),
        OpBinaire::Div => {
            if b == 0.0 {
                erreurs.push(AstError::sur_span(texte, span, MSG_DIVISION_PAR_ZERO));
                return None;
            }
            Some(a / b)
        }
    }
}

fn evaluer_fonction(
    nom: &str,
    x: f64,
    span: Span,
    texte: &str,
    erreurs: &mut Vec<AstError>,
) -> Option<f64> {
    let Some(fonction) = cherche_fonction(nom) else {
        erreurs.push(AstError::sur_span(
            texte,
            span,
            format!("{MSG_FONCTION_INCONNUE}: {nom}"),
        ));
        return None;
    };

    match fonction.applique(x) {
        Ok(v) => Some(v),
        Err(message) => {
            erreurs.push(AstError::sur_span(texte, span, message));
            None
        }
    }
}
