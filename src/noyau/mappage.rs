// src/noyau/mappage.rs
//
// Arbre concret -> AST sémantique
// -------------------------------
// - Expr / Term : premier opérande puis repli à gauche sur la répétition
//     acc := Binaire(op, acc, operande)
//   sans répétition : l’opérande seul (un nombre reste une feuille).
// - Unary       : Unaire(signe, facteur)
// - Function    : Appel(nom, expr entre parenthèses)
// - ParenExpr   : effacé, on renvoie l’expression intérieure
// - Factor      : aiguillage sur SON alternative (fonction, unaire, nombre, parenthèses)
//
// Descente récursive simple ; la profondeur suit l’imbrication du texte.

use thiserror::Error;

use super::arbre::{Noeud, Regle};
use super::expr::{Expr, OpBinaire, OpUnaire};
use super::position::Span;

/// Forme d’arbre concret inutilisable (ne devrait pas arriver avec grammaire.rs).
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum ErreurMappage {
    #[error("incomplete parse tree: {regle:?} without {manque}")]
    EnfantManquant {
        regle: Regle,
        manque: &'static str,
        span: Span,
    },

    #[error("unknown binary operator")]
    OperateurInconnu { span: Span },

    #[error("unexpected parse tree node: {regle:?}")]
    NoeudInattendu { regle: Regle, span: Span },
}

impl ErreurMappage {
    pub fn span(&self) -> Span {
        match self {
            ErreurMappage::EnfantManquant { span, .. }
            | ErreurMappage::OperateurInconnu { span }
            | ErreurMappage::NoeudInattendu { span, .. } => *span,
        }
    }
}

fn manque(noeud: &Noeud<'_>, quoi: &'static str) -> ErreurMappage {
    ErreurMappage::EnfantManquant {
        regle: noeud.regle,
        manque: quoi,
        span: noeud.span,
    }
}

/// Point d’entrée : noeud racine (ou n’importe quel noeud) -> AST.
pub fn vers_ast(noeud: &Noeud<'_>) -> Result<Expr, ErreurMappage> {
    match noeud.regle {
        Regle::Expr => chaine_binaire(noeud, Regle::Term),
        Regle::Term => chaine_binaire(noeud, Regle::Factor),
        Regle::Unary => unaire(noeud),
        Regle::Function => appel(noeud),
        Regle::ParenExpr => {
            let interieur = noeud
                .cherche_regle(Regle::Expr)
                .ok_or_else(|| manque(noeud, "inner expression"))?;
            vers_ast(interieur)
        }
        Regle::Factor => facteur(noeud),
        Regle::Number => Ok(Expr::Nombre(noeud.span)),

        Regle::Repetition
        | Regle::Maillon
        | Regle::Plus
        | Regle::Minus
        | Regle::Star
        | Regle::Slash
        | Regle::NomFonction
        | Regle::ParenOuvrante
        | Regle::ParenFermante => Err(ErreurMappage::NoeudInattendu {
            regle: noeud.regle,
            span: noeud.span,
        }),
    }
}

fn chaine_binaire(noeud: &Noeud<'_>, operande: Regle) -> Result<Expr, ErreurMappage> {
    let premier = noeud
        .enfant_direct(operande)
        .ok_or_else(|| manque(noeud, "first operand"))?;
    let mut acc = vers_ast(premier)?;

    let Some(repetition) = noeud.enfant_direct(Regle::Repetition) else {
        return Ok(acc);
    };

    for maillon in &repetition.enfants {
        let op_noeud = maillon
            .cherche(Regle::est_operateur)
            .ok_or_else(|| manque(maillon, "operator"))?;
        let droite = maillon
            .cherche_regle(operande)
            .ok_or_else(|| manque(maillon, "right operand"))?;

        let op = OpBinaire::depuis_regle(op_noeud.regle).ok_or(
            ErreurMappage::OperateurInconnu {
                span: op_noeud.span,
            },
        )?;
        acc = Expr::binaire(op, op_noeud.span, acc, vers_ast(droite)?);
    }

    Ok(acc)
}

fn unaire(noeud: &Noeud<'_>) -> Result<Expr, ErreurMappage> {
    let signe = noeud
        .cherche(Regle::est_signe)
        .ok_or_else(|| manque(noeud, "sign"))?;
    let operande = noeud
        .cherche_regle(Regle::Factor)
        .ok_or_else(|| manque(noeud, "operand"))?;

    // est_signe garantit Plus|Minus
    let op = OpUnaire::depuis_regle(signe.regle).unwrap_or(OpUnaire::Identite);
    Ok(Expr::unaire(op, signe.span, vers_ast(operande)?))
}

fn appel(noeud: &Noeud<'_>) -> Result<Expr, ErreurMappage> {
    let nom = noeud
        .cherche_regle(Regle::NomFonction)
        .ok_or_else(|| manque(noeud, "function name"))?;
    let argument = noeud
        .cherche_regle(Regle::Expr)
        .ok_or_else(|| manque(noeud, "argument"))?;

    Ok(Expr::appel(nom.texte, nom.span, vers_ast(argument)?))
}

/// Priorité : fonction, unaire, nombre, parenthèses.
/// Seuls les enfants directs comptent : une alternative imbriquée plus bas
/// (ex. le `-1` de `(-1+3)`) ne doit pas masquer celle du facteur.
fn facteur(noeud: &Noeud<'_>) -> Result<Expr, ErreurMappage> {
    const PRIORITE: [Regle; 4] = [
        Regle::Function,
        Regle::Unary,
        Regle::Number,
        Regle::ParenExpr,
    ];

    PRIORITE
        .iter()
        .find_map(|&r| noeud.enfant_direct(r))
        .ok_or_else(|| manque(noeud, "alternative"))
        .and_then(vers_ast)
}
