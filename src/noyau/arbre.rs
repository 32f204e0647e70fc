// src/noyau/arbre.rs
//
// Arbre concret (forme de la grammaire)
// -------------------------------------
// Produit une seule fois par grammaire.rs, lu une seule fois par mappage.rs.
// Jamais modifié après construction.

use super::position::Span;

/// Règle de grammaire qui a produit un noeud (ensemble fermé).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Regle {
    /// somme de termes : `term (('+'|'-') term)*`
    Expr,
    /// produit de facteurs : `factor (('*'|'/') factor)*`
    Term,
    /// groupe de répétition (toujours présent, éventuellement vide)
    Repetition,
    /// un élément de la répétition : opérateur + opérande
    Maillon,
    /// aiguillage : fonction | unaire | nombre | parenthèses
    Factor,
    Unary,
    Function,
    ParenExpr,
    Number,

    // feuilles
    Plus,
    Minus,
    Star,
    Slash,
    NomFonction,
    ParenOuvrante,
    ParenFermante,
}

impl Regle {
    pub fn est_operateur(self) -> bool {
        matches!(self, Regle::Plus | Regle::Minus | Regle::Star | Regle::Slash)
    }

    pub fn est_signe(self) -> bool {
        matches!(self, Regle::Plus | Regle::Minus)
    }
}

/// Noeud de l’arbre concret : règle + span + sous-chaîne consommée + enfants ordonnés.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Noeud<'a> {
    pub regle: Regle,
    pub span: Span,
    /// Texte exact consommé entre `span.debut` et `span.fin`.
    pub texte: &'a str,
    pub enfants: Vec<Noeud<'a>>,
}

impl<'a> Noeud<'a> {
    pub fn feuille(regle: Regle, span: Span, texte: &'a str) -> Self {
        Self {
            regle,
            span,
            texte,
            enfants: Vec::new(),
        }
    }

    /// Noeud composé : le span couvre du premier au dernier enfant.
    /// Sans enfant, span vide à `repli`.
    pub fn compose(regle: Regle, source: &'a str, enfants: Vec<Noeud<'a>>, repli: usize) -> Self {
        let span = match (enfants.first(), enfants.last()) {
            (Some(a), Some(b)) => Span::new(a.span.debut, b.span.fin),
            _ => Span::new(repli, repli),
        };
        Self {
            regle,
            span,
            texte: span.extrait(source),
            enfants,
        }
    }

    pub fn est_feuille(&self) -> bool {
        self.enfants.is_empty()
    }

    /// Premier enfant DIRECT satisfaisant le prédicat.
    pub fn enfant_direct(&self, regle: Regle) -> Option<&Noeud<'a>> {
        self.enfants.iter().find(|e| e.regle == regle)
    }

    /// Recherche en profondeur (pré-ordre) dans le sous-arbre, noeud courant inclus.
    /// Premier trouvé gagne.
    pub fn cherche<P>(&self, pred: P) -> Option<&Noeud<'a>>
    where
        P: Fn(Regle) -> bool + Copy,
    {
        if pred(self.regle) {
            return Some(self);
        }
        self.enfants.iter().find_map(|e| e.cherche(pred))
    }

    /// Raccourci : premier noeud d’une règle donnée.
    pub fn cherche_regle(&self, regle: Regle) -> Option<&Noeud<'a>> {
        self.cherche(move |r| r == regle)
    }

    /// Nombre total de noeuds (débogage / traces).
    pub fn taille(&self) -> usize {
        1 + self.enfants.iter().map(Noeud::taille).sum::<usize>()
    }
}
