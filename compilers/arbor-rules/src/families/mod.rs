//! Relation families of the standard catalogue.
//!
//! Each module exposes `family()` with its patterns in priority order. Relations
//! such as `conj`, `cop` or `nsubjpass` are added the same way through
//! `Catalogue::with_family`.

pub mod amod;
pub mod aux;
pub mod nsubj;

use arbor_protocol::{Phrase, Tag};

use crate::matcher::Matcher;

pub(crate) const NP: Matcher = Matcher::Phrase(Phrase::NP);
pub(crate) const VP: Matcher = Matcher::Phrase(Phrase::VP);
pub(crate) const S: Matcher = Matcher::Phrase(Phrase::S);

/// `CC|CONJP`
pub(crate) const COORDINATION: Matcher = Matcher::AnyOf(&[Matcher::HeadTag(Tag::CC), Matcher::Phrase(Phrase::CONJP)]);
