// Positional Substitution Engine
//
// Locates structural slots in a URL or request line and rewrites them with a payload:
//
// - patterns: one regex per fuzzing part, and the slot anchors inside each match
// - substitution: rewrites a single slot (replace / prefix / postfix)
// - cardinality: all matches in one output line, or one output line per match
// - classifier: raw-request line rules (ignore / header / parameter / plain)
//
// Architecture:
//   patterns.rs (leaf)
//       ↑
//   substitution.rs (rewrites one slot)
//       ↑
//   cardinality.rs (drives every slot of a line)     classifier.rs (raw mode)
//       ↑                                                ↑
//   driver.rs (inputs × payloads × specs) ───────────────┘

pub mod cardinality;
pub mod classifier;
pub mod patterns;
pub mod substitution;

pub use cardinality::*;
pub use classifier::*;
pub use patterns::*;
pub use substitution::*;
