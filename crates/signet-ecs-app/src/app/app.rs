use log::{debug, info};
use signet_ecs_core::{
    error::Result,
    Engine, Signature, System,
};

use super::{config::AppConfig, plugin::{Plugin, Plugins}};

///
/// Owns an engine and drives it frame by frame.
///
pub struct App {
    engine: Engine,
    config: AppConfig,
    plugins: Plugins,
    is_setup: bool,
    frame: u64,
}

impl App {
    pub fn new() -> Self {
        App::default()
    }

    pub fn with_config(config: AppConfig) -> Result<Self> {
        let engine = Engine::with_config(config.engine_config())?;

        let window = config.get_window();
        info!("App created for window \"{}\" ({}x{}).", window.title, window.width, window.height);

        Ok(App {
            engine,
            config,
            plugins: Plugins::default(),
            is_setup: false,
            frame: 0,
        })
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    pub fn engine(&self) -> &Engine {
        &self.engine
    }

    pub fn engine_mut(&mut self) -> &mut Engine {
        &mut self.engine
    }

    /// Number of frames run so far.
    pub fn frame(&self) -> u64 {
        self.frame
    }

    /// Registers the system and its signature in one step.
    pub fn add_system<T: System>(&mut self, system: T, signature: Signature) -> Result<&mut Self> {
        self.engine.register_system(system)?;
        self.engine.set_system_signature::<T>(signature)?;

        Ok(self)
    }

    ///
    /// Builds the plugin against this app. Adding a unique plugin twice
    /// panics.
    ///
    pub fn add_plugin<P: Plugin>(&mut self, plugin: P) -> Result<&mut Self> {
        self.plugins.check_unique(&plugin);

        debug!("App building plugin {}.", plugin.name());
        plugin.build(self)?;

        // only recorded once built, so a failed build can be retried
        self.plugins.push(plugin);

        Ok(self)
    }

    pub fn contains_plugin<P: Plugin>(&self) -> bool {
        self.plugins.contains_plugin::<P>()
    }

    pub fn get_plugin<P: Plugin>(&self) -> Option<&P> {
        self.plugins.get_plugin::<P>()
    }

    /// Finishes all plugins. Only the first call has an effect.
    pub fn setup(&mut self) -> Result<&mut Self> {
        if self.is_setup {
            return Ok(self);
        }
        self.is_setup = true;

        let plugins = self.plugins.detach();
        let result = Plugins::finish(&plugins, self);
        self.plugins.reattach(plugins);

        result?;

        debug!("App finished {} plugins.", self.plugins.len());

        Ok(self)
    }

    pub fn update(&mut self) -> Result<&mut Self> {
        self.engine.update()?;
        self.frame += 1;

        Ok(self)
    }

    pub fn run_frames(&mut self, frames: u64) -> Result<&mut Self> {
        self.setup()?;

        for _ in 0..frames {
            self.update()?;
        }

        Ok(self)
    }

    ///
    /// Runs until the configured frame limit. Without a limit this only
    /// returns when a frame fails.
    ///
    pub fn run(&mut self) -> Result<()> {
        self.setup()?;

        info!("App running with frame limit {:?}.", self.config.get_frame_limit());

        match self.config.get_frame_limit() {
            Some(limit) => {
                while self.frame < limit {
                    self.update()?;
                }
            }
            None => loop {
                self.update()?;
            }
        }

        info!("App stopped after {} frames.", self.frame);

        Ok(())
    }
}

impl Default for App {
    fn default() -> Self {
        App {
            engine: Engine::new(),
            config: AppConfig::default(),
            plugins: Plugins::default(),
            is_setup: false,
            frame: 0,
        }
    }
}
