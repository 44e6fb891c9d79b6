use signet_ecs::core::{Engine, Entity, Result, System};

///
/// Hello, world for signet-ecs-core.
///
/// The core is usable without the app: create an engine, register
/// systems and update it directly.
///
fn main() -> Result<()> {
    let mut engine = Engine::new();

    engine.register_system(Hello)?;

    // evaluate all systems in registration order
    engine.update()?;
    engine.update()?;

    Ok(())
}

struct Hello;

impl System for Hello {
    fn update(&mut self, _engine: &mut Engine, _entities: &[Entity]) -> Result<()> {
        println!("Hello, world");

        Ok(())
    }
}
