// src/noyau/fonctions.rs
//
// Table des fonctions : nom -> calcul + garde de domaine optionnelle.
// Ajouter une fonction = ajouter une ligne.
// La complétion lit la même table (nom, description, snippet).

pub const MSG_RACINE_NEGATIVE: &str = "cannot take square root of a negative number";
pub const MSG_LOG_NON_POSITIF: &str = "cannot take logarithm of a non-positive number";

/// Domaine : `rejette(x)` vrai => diagnostic `message`.
/// NaN et ±∞ ne sont jamais rejetés (comparaisons fausses).
#[derive(Clone, Copy, Debug)]
pub struct Garde {
    pub rejette: fn(f64) -> bool,
    pub message: &'static str,
}

#[derive(Clone, Copy, Debug)]
pub struct Fonction {
    pub nom: &'static str,
    pub description: &'static str,
    /// Snippet inséré par la complétion (`$1` = curseur).
    pub insertion: &'static str,
    pub calcul: fn(f64) -> f64,
    pub garde: Option<Garde>,
}

pub const FONCTIONS: &[Fonction] = &[
    Fonction {
        nom: "sin",
        description: "sine (radians)",
        insertion: "sin($1)",
        calcul: f64::sin,
        garde: None,
    },
    Fonction {
        nom: "sqrt",
        description: "square root",
        insertion: "sqrt($1)",
        calcul: f64::sqrt,
        garde: Some(Garde {
            rejette: |x| x < 0.0,
            message: MSG_RACINE_NEGATIVE,
        }),
    },
    Fonction {
        nom: "cos",
        description: "cosine (radians)",
        insertion: "cos($1)",
        calcul: f64::cos,
        garde: None,
    },
    Fonction {
        nom: "tan",
        description: "tangent (radians)",
        insertion: "tan($1)",
        calcul: f64::tan,
        garde: None,
    },
    Fonction {
        nom: "log",
        description: "natural logarithm",
        insertion: "log($1)",
        calcul: f64::ln,
        garde: Some(Garde {
            rejette: |x| x <= 0.0,
            message: MSG_LOG_NON_POSITIF,
        }),
    },
];

pub fn cherche_fonction(nom: &str) -> Option<&'static Fonction> {
    FONCTIONS.iter().find(|f| f.nom == nom)
}

impl Fonction {
    /// Applique la fonction ; `Err(message)` si la garde refuse l’argument.
    pub fn applique(&self, x: f64) -> Result<f64, &'static str> {
        if let Some(garde) = self.garde {
            if (garde.rejette)(x) {
                return Err(garde.message);
            }
        }
        Ok((self.calcul)(x))
    }
}
