// src/noyau/expr.rs
//
// AST sémantique (indépendant de la forme de la grammaire).
// - Nombre   : feuille ; le lexème est relu en f64 à l’évaluation
// - Unaire   : signe + opérande
// - Binaire  : + - * / associatif à gauche
// - Appel    : fonction à un argument (nom non vérifié ici)
//
// Arbre strict : chaque noeud possède ses enfants, pas de partage.
// Le span de chaque noeud pointe le jeton qui le porte (opérateur, signe,
// nom de fonction, littéral) : c’est là que les diagnostics sont posés.

use super::arbre::Regle;
use super::position::Span;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum OpUnaire {
    Negation,
    Identite,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum OpBinaire {
    Add,
    Sub,
    Mul,
    Div,
}

impl OpUnaire {
    pub fn depuis_regle(regle: Regle) -> Option<Self> {
        match regle {
            Regle::Minus => Some(OpUnaire::Negation),
            Regle::Plus => Some(OpUnaire::Identite),
            _ => None,
        }
    }

    pub fn symbole(self) -> &'static str {
        match self {
            OpUnaire::Negation => "-",
            OpUnaire::Identite => "+",
        }
    }
}

impl OpBinaire {
    pub fn depuis_regle(regle: Regle) -> Option<Self> {
        match regle {
            Regle::Plus => Some(OpBinaire::Add),
            Regle::Minus => Some(OpBinaire::Sub),
            Regle::Star => Some(OpBinaire::Mul),
            Regle::Slash => Some(OpBinaire::Div),
            _ => None,
        }
    }

    pub fn symbole(self) -> &'static str {
        match self {
            OpBinaire::Add => "+",
            OpBinaire::Sub => "-",
            OpBinaire::Mul => "*",
            OpBinaire::Div => "/",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Expr {
    Nombre(Span),
    Unaire {
        op: OpUnaire,
        span: Span,
        operande: Box<Expr>,
    },
    Binaire {
        op: OpBinaire,
        span: Span,
        gauche: Box<Expr>,
        droite: Box<Expr>,
    },
    Appel {
        nom: String,
        span: Span,
        argument: Box<Expr>,
    },
}

impl Expr {
    pub fn binaire(op: OpBinaire, span: Span, gauche: Expr, droite: Expr) -> Expr {
        Expr::Binaire {
            op,
            span,
            gauche: Box::new(gauche),
            droite: Box::new(droite),
        }
    }

    pub fn unaire(op: OpUnaire, span: Span, operande: Expr) -> Expr {
        Expr::Unaire {
            op,
            span,
            operande: Box::new(operande),
        }
    }

    pub fn appel(nom: impl Into<String>, span: Span, argument: Expr) -> Expr {
        Expr::Appel {
            nom: nom.into(),
            span,
            argument: Box::new(argument),
        }
    }

    /// Span du jeton porteur (utilisé pour positionner les diagnostics).
    pub fn span(&self) -> Span {
        match self {
            Expr::Nombre(span) => *span,
            Expr::Unaire { span, .. } | Expr::Binaire { span, .. } | Expr::Appel { span, .. } => {
                *span
            }
        }
    }

    /// Profondeur (une feuille = 1).
    pub fn profondeur(&self) -> usize {
        match self {
            Expr::Nombre(_) => 1,
            Expr::Unaire { operande, .. } => 1 + operande.profondeur(),
            Expr::Appel { argument, .. } => 1 + argument.profondeur(),
            Expr::Binaire { gauche, droite, .. } => {
                1 + gauche.profondeur().max(droite.profondeur())
            }
        }
    }
}
