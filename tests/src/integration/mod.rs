//! Cross-component flows through the slashing report pipeline.
