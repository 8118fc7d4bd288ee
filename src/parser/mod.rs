//
//  mod.rs
//  testmeta
//

pub mod annotations;
pub mod extractor;
pub mod language;
pub mod rules;

pub use annotations::{apply_base_path, AnnotationScanner, PrefixScope};
pub use extractor::{extract_file, extract_tree, parse_source};
pub use language::SupportedLanguage;
pub use rules::RuleSet;
