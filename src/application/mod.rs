// ============================================================
// Layer 2 — Application / Use Cases
// ============================================================
// Sits between the menu (Layer 1) and the train model (Layer 3).
//
// Rules for this layer:
//   - No reading input or printing here (that's Layer 1)
//   - One domain operation per request
//   - Logging of what was done lives here, not in the domain
//
// Reference: Clean Architecture pattern
//            Rust Book §7 (Module System)

// Request → domain call → Outcome
pub mod operator;
