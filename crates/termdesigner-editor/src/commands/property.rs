use super::Command;
use crate::document::DesignContext;
use crate::property::{PropertyKey, PropertyValue};
use termdesigner_core::{NodeId, Result};

/// Changes one designable property of one design.
pub struct SetProperty {
    node: NodeId,
    key: PropertyKey,
    new_value: PropertyValue,
    old_value: Option<PropertyValue>,
    label: String,
}

impl SetProperty {
    pub fn new(node: NodeId, key: PropertyKey, value: PropertyValue) -> Self {
        Self {
            node,
            key,
            new_value: value,
            old_value: None,
            label: format!("Set {}", key),
        }
    }

    fn apply(&self, ctx: &mut DesignContext, value: &PropertyValue) {
        if let Err(e) = ctx.tree.set_property(self.node, self.key, value.duplicate()) {
            tracing::warn!("Could not set {} on {}: {}", self.key, self.node, e);
        }
    }
}

impl Command for SetProperty {
    fn name(&self) -> &str {
        &self.label
    }

    fn execute(&mut self, ctx: &mut DesignContext) -> Result<bool> {
        let current = ctx.tree.get_property(self.node, self.key)?;
        if current == self.new_value {
            return Ok(false);
        }
        let old = ctx
            .tree
            .set_property(self.node, self.key, self.new_value.duplicate())?;
        self.old_value = Some(old);
        Ok(true)
    }

    fn undo(&mut self, ctx: &mut DesignContext) {
        if let Some(old) = self.old_value.clone() {
            self.apply(ctx, &old);
        }
    }

    fn redo(&mut self, ctx: &mut DesignContext) {
        let value = self.new_value.clone();
        self.apply(ctx, &value);
    }
}
