//! Marked-content text assembly.
//!
//! Text arrives as a flat, ordered stream of fragments. Fragments between a
//! span opener and its end marker belong to one marked-content identifier;
//! the assembler concatenates them into one [`ContentRecord`] per identifier
//! so the structure tree can reference whole content units.

mod marked_content;

pub use marked_content::{
    ContentMap, ContentRecord, MarkedContentAssembler, TextFragment, assemble_marked_content,
};
