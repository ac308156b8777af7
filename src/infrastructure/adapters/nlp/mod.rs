pub mod lexicon;
pub mod lexicon_provisioner;
pub mod text_preprocessor;

pub use lexicon::Lexicon;
pub use lexicon_provisioner::LexiconProvisioner;
pub use text_preprocessor::ReviewPreprocessor;
