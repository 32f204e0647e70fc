//! Noyau — orchestration de l’analyse
//!
//! pré-validation (toujours) -> [parse entièrement valide ET aucun défaut]
//!   -> mappage -> évaluation -> résultat
//!
//! Invariant : dès qu’il y a au moins un diagnostic, la valeur est absente,
//! même si une partie de l’arbre était calculable.

use tracing::debug;

use super::diagnostic::AstError;
use super::eval::evaluer;
use super::expr::Expr;
use super::grammaire::{parse, IssueParse, ResultatParse, MSG_IMBRICATION_EXCESSIVE};
use super::mappage::vers_ast;
use super::position::Span;
use super::validation::pre_valider;

#[derive(Clone, Debug, Default, PartialEq)]
pub struct ResultatAnalyse {
    pub erreurs: Vec<AstError>,
    pub ast: Option<Expr>,
    pub valeur: Option<f64>,
}

impl ResultatAnalyse {
    pub fn a_une_valeur(&self) -> bool {
        self.valeur.is_some()
    }
}

/// Analyse un texte déjà parsé. Pure : aucun état caché entre deux appels.
pub fn analyser(texte: &str, parse: &ResultatParse<'_>) -> ResultatAnalyse {
    let mut erreurs = pre_valider(texte);
    let mut ast = None;
    let mut valeur = None;

    if let Some(o) = parse.issue.profondeur_depassee {
        let span = match texte.get(o..).and_then(|reste| reste.chars().next()) {
            Some(c) => Span::caractere(o, c),
            None => Span::new(o, o),
        };
        erreurs.push(AstError::sur_span(texte, span, MSG_IMBRICATION_EXCESSIVE));
    }

    if parse.est_entierement_valide() && erreurs.is_empty() {
        if let Some(racine) = &parse.racine {
            match vers_ast(racine) {
                Ok(expr) => {
                    valeur = evaluer(&expr, texte, &mut erreurs);
                    ast = Some(expr);
                }
                Err(e) => {
                    erreurs.push(AstError::sur_span(texte, e.span(), e.to_string()));
                }
            }
        }
    }

    if !erreurs.is_empty() {
        valeur = None;
    }

    debug!(
        longueur = texte.len(),
        erreurs = erreurs.len(),
        valeur = ?valeur,
        "analyse"
    );

    ResultatAnalyse {
        erreurs,
        ast,
        valeur,
    }
}

/// Raccourci : parse + analyse.
pub fn analyser_texte(texte: &str) -> ResultatAnalyse {
    let p = parse(texte);
    analyser(texte, &p)
}

/* ------------------------ Coloration préfixe / suffixe ------------------------ */

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Classe {
    /// `[0, consomme)`
    Reconnu,
    /// `[consomme, total)`
    Rejete,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Segment {
    pub span: Span,
    pub classe: Classe,
}

/// Découpe le texte d’après la seule issue du parse (pas l’AST).
pub fn classifier(issue: &IssueParse) -> Vec<Segment> {
    let mut out = Vec::with_capacity(2);
    let fin_valide = issue.consomme.min(issue.total);

    if fin_valide > 0 {
        out.push(Segment {
            span: Span::new(0, fin_valide),
            classe: Classe::Reconnu,
        });
    }
    if fin_valide < issue.total {
        out.push(Segment {
            span: Span::new(fin_valide, issue.total),
            classe: Classe::Rejete,
        });
    }

    out
}
