use std::{collections::HashSet, any::{type_name, Any, TypeId}};

use signet_ecs_core::error::Result;

use super::app::App;

///
/// A bundle of registrations applied to an app: components, systems and
/// their signatures.
///
pub trait Plugin: 'static {
    fn build(&self, app: &mut App) -> Result<()>;

    fn name(&self) -> &str {
        type_name::<Self>()
    }

    fn is_unique(&self) -> bool {
        true
    }

    /// Called once by `App::setup` after every plugin has been built.
    fn finish(&self, _app: &mut App) -> Result<()> {
        Ok(())
    }
}

pub(crate) struct Plugins {
    plugins: Vec<Box<dyn DynPlugin>>,
    types: HashSet<TypeId>,
    names: HashSet<String>,
}

impl Plugins {
    /// Panics if a unique plugin with the same name was already added.
    pub(crate) fn check_unique<P: Plugin>(&self, plugin: &P) {
        if plugin.is_unique() && self.names.contains(plugin.name()) {
            panic!("Attempted to add duplicate plugin {}", plugin.name());
        }
    }

    pub(crate) fn push<P: Plugin>(&mut self, plugin: P) {
        self.check_unique(&plugin);

        if plugin.is_unique() {
            self.names.insert(plugin.name().to_string());
        }
        self.types.insert(TypeId::of::<P>());

        self.plugins.push(Box::new(PluginItem::new(plugin)));
    }

    pub(crate) fn contains_plugin<P: Plugin>(&self) -> bool {
        self.types.contains(&TypeId::of::<P>())
    }

    pub(crate) fn get_plugin<P: Plugin>(&self) -> Option<&P> {
        self.plugins.iter()
            .find_map(|plugin| plugin.as_any().downcast_ref::<P>())
    }

    pub(crate) fn len(&self) -> usize {
        self.plugins.len()
    }

    ///
    /// Moves the plugins out so their `finish` can borrow the app. Names and
    /// types stay registered, so duplicate checks and `contains_plugin`
    /// keep working while detached.
    ///
    pub(crate) fn detach(&mut self) -> Vec<Box<dyn DynPlugin>> {
        std::mem::take(&mut self.plugins)
    }

    /// Puts detached plugins back ahead of any added since `detach`.
    pub(crate) fn reattach(&mut self, mut plugins: Vec<Box<dyn DynPlugin>>) {
        plugins.append(&mut self.plugins);
        self.plugins = plugins;
    }

    pub(crate) fn finish(plugins: &[Box<dyn DynPlugin>], app: &mut App) -> Result<()> {
        for plugin in plugins {
            plugin.finish(app)
                .map_err(|err| err.rethrow(plugin.name()))?;
        }

        Ok(())
    }
}

impl Default for Plugins {
    fn default() -> Self {
        Self {
            plugins: Default::default(),
            types: Default::default(),
            names: Default::default()
        }
    }
}

struct PluginItem<P: Plugin> {
    plugin: P,
}

impl<P: Plugin> PluginItem<P> {
    fn new(plugin: P) -> Self {
        Self {
            plugin
        }
    }
}

impl<P: Plugin> DynPlugin for PluginItem<P> {
    fn name(&self) -> &str {
        self.plugin.name()
    }

    fn finish(&self, app: &mut App) -> Result<()> {
        self.plugin.finish(app)
    }

    fn as_any(&self) -> &dyn Any {
        &self.plugin
    }
}

pub(crate) trait DynPlugin {
    fn name(&self) -> &str;
    fn finish(&self, app: &mut App) -> Result<()>;
    fn as_any(&self) -> &dyn Any;
}
