use signet_ecs::{
    app::{App, AppConfig, Plugin},
    core::{Component, Engine, Entity, Result, Signature, System},
};

#[derive(Component, Debug)]
struct Position(f32, f32);

#[derive(Component, Clone, Copy, Debug)]
struct Velocity(f32, f32);

struct Movement;

impl System for Movement {
    fn update(&mut self, engine: &mut Engine, entities: &[Entity]) -> Result<()> {
        for entity in entities {
            let Velocity(dx, dy) = *engine.get_component::<Velocity>(*entity)?;
            let pos = engine.get_component_mut::<Position>(*entity)?;

            pos.0 += dx;
            pos.1 += dy;

            println!("{} at {:?}", entity, pos);
        }

        Ok(())
    }
}

struct HelloPlugin;

impl Plugin for HelloPlugin {
    fn build(&self, app: &mut App) -> Result<()> {
        let engine = app.engine_mut();

        let signature = Signature::from_types(&[
            engine.register_component::<Position>()?,
            engine.register_component::<Velocity>()?,
        ]);

        app.add_system(Movement, signature)?;

        let engine = app.engine_mut();
        let entity = engine.create_entity()?;
        engine.add_component(entity, Position(0., 0.))?;
        engine.add_component(entity, Velocity(1., 0.5))?;

        Ok(())
    }
}

///
/// Hello, world for signet-ecs-app: one moving entity for three frames.
///
pub fn main() -> Result<()> {
    let mut app = App::with_config(AppConfig::new().frame_limit(3))?;

    app.add_plugin(HelloPlugin)?;

    app.run()
}
