// src/noyau/position.rs
//
// Indexeur de positions
// ---------------------
// - offset (octets UTF-8) -> (ligne, colonne), 0-based
// - colonne comptée en caractères, remise à 0 après chaque '\n'
// - aucun débordement: un offset au-delà du texte est borné à la fin

/// Région `[debut, fin)` en offsets dans le texte source.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Span {
    pub debut: usize,
    pub fin: usize,
}

impl Span {
    pub fn new(debut: usize, fin: usize) -> Self {
        Self { debut, fin }
    }

    /// Span d’un seul caractère (parenthèse, opérateur).
    pub fn caractere(offset: usize, c: char) -> Self {
        Self::new(offset, offset + c.len_utf8())
    }

    pub fn est_vide(&self) -> bool {
        self.fin <= self.debut
    }

    /// Sous-chaîne couverte (vide si le span sort du texte ou coupe un caractère).
    pub fn extrait<'t>(&self, texte: &'t str) -> &'t str {
        texte.get(self.debut..self.fin).unwrap_or("")
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Position {
    pub ligne: usize,
    pub colonne: usize,
}

impl Position {
    pub fn new(ligne: usize, colonne: usize) -> Self {
        Self { ligne, colonne }
    }
}

/// Plage ligne/colonne semi-ouverte (`debut` inclus, `fin` exclu).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Plage {
    pub debut: Position,
    pub fin: Position,
}

/// offset -> (ligne, colonne).
pub fn offset_vers_position(texte: &str, offset: usize) -> Position {
    let mut ligne = 0;
    let mut colonne = 0;

    for (i, c) in texte.char_indices() {
        if i >= offset {
            break;
        }
        if c == '\n' {
            ligne += 1;
            colonne = 0;
        } else {
            colonne += 1;
        }
    }

    Position { ligne, colonne }
}

/// Span (offsets) -> plage (ligne/colonne).
pub fn span_vers_plage(texte: &str, span: Span) -> Plage {
    Plage {
        debut: offset_vers_position(texte, span.debut),
        fin: offset_vers_position(texte, span.fin),
    }
}

/// (ligne, colonne) -> offset.
///
/// `None` si la position ne tombe pas dans le texte (la fin du texte est acceptée).
/// Une colonne au-delà de la fin d’une ligne ne “déborde” pas sur la suivante.
pub fn position_vers_offset(texte: &str, position: Position) -> Option<usize> {
    let mut ligne = 0;
    let mut colonne = 0;

    for (i, c) in texte.char_indices() {
        if ligne == position.ligne && colonne == position.colonne {
            return Some(i);
        }
        if c == '\n' {
            ligne += 1;
            colonne = 0;
        } else {
            colonne += 1;
        }
    }

    (ligne == position.ligne && colonne == position.colonne).then_some(texte.len())
}
