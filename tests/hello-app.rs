use std::sync::{Arc, Mutex};

use signet_ecs::{
    app::{App, AppConfig, Plugin, WindowConfig},
    core::{Engine, Entity, Result, Signature, System},
};

#[test]
fn test_hello() {
    let mut app = App::with_config(AppConfig::new().frame_limit(2)).unwrap();

    let arc = Arc::new(Mutex::new(Vec::<String>::new()));

    app.add_plugin(HelloPlugin(arc.clone())).unwrap();
    assert_eq!(take(&arc), "");

    app.run().unwrap();
    assert_eq!(take(&arc), "hello, world, hello, world");
    assert_eq!(app.frame(), 2);
}

#[test]
fn window_defaults() {
    let app = App::new();

    assert_eq!(app.config().get_window(), &WindowConfig::new(512, 512, "ECS Game"));
}

struct HelloPlugin(Arc<Mutex<Vec<String>>>);

impl Plugin for HelloPlugin {
    fn build(&self, app: &mut App) -> Result<()> {
        app.add_system(Hello(self.0.clone()), Signature::new())?;

        Ok(())
    }
}

struct Hello(Arc<Mutex<Vec<String>>>);

impl System for Hello {
    fn update(&mut self, _engine: &mut Engine, _entities: &[Entity]) -> Result<()> {
        self.0.lock().unwrap().push("hello, world".into());

        Ok(())
    }
}

fn take(arc: &Arc<Mutex<Vec<String>>>) -> String {
    let vec : Vec<String> = arc.lock().unwrap().drain(..).collect();

    vec.join(", ")
}
