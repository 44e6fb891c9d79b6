use log::info;
use signet_ecs::{
    app::{App, AppConfig},
    core::{Engine, Entity, Result, Signature, System},
};

#[derive(Default)]
struct TestSystem;

impl System for TestSystem {
    fn update(&mut self, _engine: &mut Engine, entities: &[Entity]) -> Result<()> {
        for entity in entities {
            info!("TestSystem update Entity {}.", entity);
        }

        Ok(())
    }
}

fn main() -> Result<()> {
    env_logger::init();

    let mut app = App::with_config(AppConfig::default())?;
    let engine = app.engine_mut();

    let entity = engine.create_entity()?;
    info!("Created entity {}.", entity);

    engine.register_component::<f32>()?;
    engine.add_component::<f32>(entity, 1.0)?;

    let component_type = engine.component_type::<f32>()?;
    info!("component_type: {}", component_type);

    info!("Added component to entity {}.", engine.get_component::<f32>(entity)?);

    let has_component = engine.has_component::<f32>(entity)?;
    info!("Entity has component: {}", has_component);

    engine.register_default_system::<TestSystem>()?;
    engine.set_system_signature::<TestSystem>(Signature::from_types(&[component_type]))?;

    app.update()?;

    app.engine_mut().remove_component::<f32>(entity)?;
    app.update()?;

    app.engine_mut().destroy_entity(entity)?;
    app.update()?;

    info!("Ran {} frames.", app.frame());

    Ok(())
}
