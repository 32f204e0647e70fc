// src/noyau/grammaire.rs
//
// Moteur de grammaire : texte -> arbre concret (ou préfixe reconnu)
// -----------------------------------------------------------------
//   expr     := term   Repetition( Maillon( ('+'|'-') term   ) )*
//   term     := factor Repetition( Maillon( ('*'|'/') factor ) )*
//   factor   := Factor( function | unary | number | paren )
//   unary    := Unary( ('+'|'-') factor )
//   function := Function( NomFonction paren )
//   paren    := ParenExpr( '(' expr ')' )
//
// La précédence est encodée par l’imbrication des règles ; mappage.rs la replie
// en arbre binaire associatif à gauche.

use nom::{
    branch::alt,
    character::complete::multispace0,
    error::{context, ContextError, ErrorKind, ParseError, VerboseError, VerboseErrorKind},
    sequence::terminated,
};
use tracing::trace;

use super::arbre::{Noeud, Regle};
use super::jetons::{
    entree, fois_ou_divise, nom_fonction, nombre, paren_fermante, paren_ouvrante, plus_ou_moins,
    Entree, PResult,
};

/// Opérandes imbriqués au plus (parenthèses, appels, signes).
/// Au-delà, le parse échoue au lieu d’épuiser la pile.
pub const PROFONDEUR_MAX: usize = 32;

const CONTEXTE_PROFONDEUR: &str = "nesting depth";

pub const MSG_IMBRICATION_EXCESSIVE: &str = "expression nested too deeply";

/// Issue du parse, sans l’arbre (possédée, copiable entre sessions).
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct IssueParse {
    /// Une expression a été reconnue en tête du texte.
    pub reussi: bool,
    /// Longueur reconnue (octets, blancs finaux inclus).
    pub consomme: usize,
    pub total: usize,
    /// Contextes attendus au point d’échec (vide si rien n’a échoué).
    pub attendu: Vec<String>,
    /// Offset de l’opérande qui dépasse `PROFONDEUR_MAX`, le cas échéant.
    pub profondeur_depassee: Option<usize>,
}

impl IssueParse {
    /// Tout le texte est une expression.
    pub fn est_entierement_valide(&self) -> bool {
        self.reussi && self.consomme == self.total
    }
}

/// Issue + arbre concret (emprunte le texte).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ResultatParse<'a> {
    pub issue: IssueParse,
    pub racine: Option<Noeud<'a>>,
}

impl ResultatParse<'_> {
    pub fn est_entierement_valide(&self) -> bool {
        self.issue.est_entierement_valide()
    }
}

/// Parse le texte complet. Ne panique jamais ; un échec donne `reussi = false`.
pub fn parse(texte: &str) -> ResultatParse<'_> {
    let input = entree(texte);

    let resultat = match terminated(expr, multispace0)(input) {
        Ok((reste, racine)) => ResultatParse {
            issue: IssueParse {
                reussi: true,
                consomme: reste.location_offset(),
                total: texte.len(),
                attendu: Vec::new(),
                profondeur_depassee: None,
            },
            racine: Some(racine),
        },
        Err(nom::Err::Error(e)) | Err(nom::Err::Failure(e)) => ResultatParse {
            issue: IssueParse {
                reussi: false,
                consomme: 0,
                total: texte.len(),
                attendu: contextes_attendus(&e),
                profondeur_depassee: offset_trop_profond(&e),
            },
            racine: None,
        },
        Err(nom::Err::Incomplete(_)) => ResultatParse {
            issue: IssueParse {
                reussi: false,
                consomme: 0,
                total: texte.len(),
                attendu: Vec::new(),
                profondeur_depassee: None,
            },
            racine: None,
        },
    };

    trace!(
        reussi = resultat.issue.reussi,
        consomme = resultat.issue.consomme,
        total = resultat.issue.total,
        "parse"
    );
    resultat
}

/// Contextes nom (du plus profond au plus externe), sans doublons.
fn contextes_attendus(e: &VerboseError<Entree<'_>>) -> Vec<String> {
    let mut out: Vec<String> = Vec::new();
    for (_, kind) in &e.errors {
        if let VerboseErrorKind::Context(ctx) = kind {
            if !out.iter().any(|c| c == ctx) {
                out.push((*ctx).to_string());
            }
        }
    }
    out
}

fn offset_trop_profond(e: &VerboseError<Entree<'_>>) -> Option<usize> {
    e.errors.iter().find_map(|(i, kind)| {
        matches!(kind, VerboseErrorKind::Context(CONTEXTE_PROFONDEUR)).then(|| i.location_offset())
    })
}

/* ------------------------ Règles ------------------------ */

pub fn expr(input: Entree<'_>) -> PResult<'_, Noeud<'_>> {
    context("expression", somme)(input)
}

fn somme(input: Entree<'_>) -> PResult<'_, Noeud<'_>> {
    chaine(input, Regle::Expr, term, plus_ou_moins)
}

fn term(input: Entree<'_>) -> PResult<'_, Noeud<'_>> {
    chaine(input, Regle::Term, factor, fois_ou_divise)
}

type FnRegle<'a> = fn(Entree<'a>) -> PResult<'a, Noeud<'a>>;

/// `operande (operateur operande)*` : premier opérande + groupe de répétition.
fn chaine<'a>(
    input: Entree<'a>,
    regle: Regle,
    operande: FnRegle<'a>,
    operateur: FnRegle<'a>,
) -> PResult<'a, Noeud<'a>> {
    let source = input.extra.source;

    let (input, premier) = operande(input)?;
    let repli = input.location_offset();

    // zéro ou plus : un maillon incomplet n’est pas consommé (préfixe reconnu)
    let mut input = input;
    let mut maillons = Vec::new();
    loop {
        match maillon(input, operande, operateur) {
            Ok((suite, m)) => {
                maillons.push(m);
                input = suite;
            }
            Err(nom::Err::Error(_)) => break,
            Err(e) => return Err(e),
        }
    }

    let repetition = Noeud::compose(Regle::Repetition, source, maillons, repli);
    let debut = premier.span.debut;
    Ok((
        input,
        Noeud::compose(regle, source, vec![premier, repetition], debut),
    ))
}

fn maillon<'a>(
    input: Entree<'a>,
    operande: FnRegle<'a>,
    operateur: FnRegle<'a>,
) -> PResult<'a, Noeud<'a>> {
    let source = input.extra.source;
    let repli = input.location_offset();

    let (input, op) = operateur(input)?;
    let (input, droite) = operande(input)?;

    Ok((
        input,
        Noeud::compose(Regle::Maillon, source, vec![op, droite], repli),
    ))
}

fn factor(input: Entree<'_>) -> PResult<'_, Noeud<'_>> {
    let source = input.extra.source;
    let repli = input.location_offset();
    let profondeur = input.extra.profondeur;

    if profondeur >= PROFONDEUR_MAX {
        // Failure : coupe les alternatives, tout le parse échoue ici
        let e = VerboseError::from_error_kind(input, ErrorKind::TooLarge);
        return Err(nom::Err::Failure(VerboseError::add_context(
            input,
            CONTEXTE_PROFONDEUR,
            e,
        )));
    }

    let mut dedans = input;
    dedans.extra.profondeur = profondeur + 1;
    let (mut input, alternative) =
        context("operand", alt((function, unary, nombre, paren)))(dedans)?;
    input.extra.profondeur = profondeur;

    Ok((
        input,
        Noeud::compose(Regle::Factor, source, vec![alternative], repli),
    ))
}

fn unary(input: Entree<'_>) -> PResult<'_, Noeud<'_>> {
    let source = input.extra.source;
    let repli = input.location_offset();

    let (input, signe) = plus_ou_moins(input)?;
    let (input, operande) = factor(input)?;

    Ok((
        input,
        Noeud::compose(Regle::Unary, source, vec![signe, operande], repli),
    ))
}

fn function(input: Entree<'_>) -> PResult<'_, Noeud<'_>> {
    let source = input.extra.source;
    let repli = input.location_offset();

    let (input, nom) = nom_fonction(input)?;
    let (input, argument) = paren(input)?;

    Ok((
        input,
        Noeud::compose(Regle::Function, source, vec![nom, argument], repli),
    ))
}

fn paren(input: Entree<'_>) -> PResult<'_, Noeud<'_>> {
    let source = input.extra.source;
    let repli = input.location_offset();

    let (input, ouvrante) = paren_ouvrante(input)?;
    let (input, interieur) = expr(input)?;
    let (input, fermante) = paren_fermante(input)?;

    Ok((
        input,
        Noeud::compose(
            Regle::ParenExpr,
            source,
            vec![ouvrante, interieur, fermante],
            repli,
        ),
    ))
}
