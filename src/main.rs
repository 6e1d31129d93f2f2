//! Headless demo: a player runs toward a patrolling enemy, jumps and fires

use std::error::Error;
use std::path::PathBuf;

use clap::Parser;
use gameplay::prelude::*;
use hecs::Entity;

/// Downward acceleration applied by the demo host to airborne bodies
const GRAVITY: f32 = -20.0;

#[derive(Debug, Parser)]
#[command(about = "Run the gameplay demo without a window")]
struct Args {
    /// RON or JSON configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Number of fixed steps to simulate
    #[arg(short, long, default_value_t = 240)]
    ticks: u64,

    /// Override the random seed from the configuration
    #[arg(short, long)]
    seed: Option<u64>,
}

/// Demo scene: ground, player and one enemy
struct Demo {
    sim: Simulation,
    player: Entity,
    ground: Entity,
    enemy: Entity,
    airborne: bool,
}

impl Demo {
    fn new(config: &GameplayConfig) -> Self {
        let mut sim = Simulation::new(&config.simulation);

        let ctx = sim.context_mut();
        let ground = ctx
            .world
            .spawn((Transform::default(), Tag::new("Ground"), Name::new("Ground")));
        let player = ctx.world.spawn((
            Transform::default(),
            Velocity::default(),
            Tag::new("Player"),
            Name::new("Player"),
            config.stats,
        ));
        let enemy = ctx.world.spawn((
            Transform::from_position(Vec3::new(8.0, 0.0, 0.0)),
            Name::new("Enemy"),
        ));
        let enemy_behavior = EnemyBehavior::new(enemy, config.enemy.clone(), &mut ctx.rng);

        ctx.jump_observers
            .subscribe(|entity| log::info!("Observer saw {entity:?} jump"));

        sim.attach(PlayerController::new(player, config.player.clone()));
        sim.attach(enemy_behavior);
        sim.collision_enter(player, ground);

        Self {
            sim,
            player,
            ground,
            enemy,
            airborne: false,
        }
    }

    /// Press and release keys on a fixed timeline
    fn script_input(&mut self, frame: u64) {
        let input = &mut self.sim.context_mut().input;
        match frame {
            0 => input.press(Key::D),
            30 => input.press(Key::W),
            31 => input.release(Key::W),
            45 => input.press(Key::Space),
            46 => input.release(Key::Space),
            150 => {
                input.release(Key::D);
                input.press(Key::A);
            }
            _ => {}
        }
    }

    /// Toy vertical motion so jumps land again; no collision solving
    fn apply_gravity(&mut self) {
        let dt = self.sim.context().time.step();
        let world = &mut self.sim.context_mut().world;

        let Some(position) = world.position(self.player) else {
            return;
        };
        if let Ok(mut velocity) = world.get_mut::<Velocity>(self.player) {
            if position.y < 0.0 {
                velocity.linear.y = 0.0;
            } else if position.y > 0.0 || velocity.linear.y > 0.0 {
                velocity.linear.y += GRAVITY * dt;
            }
        }
        if position.y < 0.0
            && let Ok(mut transform) = world.get_mut::<Transform>(self.player)
        {
            transform.position.y = 0.0;
        }
        let landed = position.y <= 0.0;

        match (self.airborne, landed) {
            (true, true) => {
                self.airborne = false;
                self.sim.collision_enter(self.player, self.ground);
            }
            (false, false) => {
                self.airborne = true;
                self.sim.collision_exit(self.player, self.ground);
            }
            _ => {}
        }
    }

    fn report_events(&self) {
        for event in self.sim.context().events.iter() {
            log::info!("event: {event:?}");
        }
    }

    fn run(&mut self, ticks: u64) {
        for frame in 0..ticks {
            self.script_input(frame);

            if frame == 90 {
                let world = &mut self.sim.context_mut().world;
                if let Ok(mut velocity) = world.get_mut::<Velocity>(self.player) {
                    SpeedBoost::default().apply(&mut velocity);
                }
            }
            if frame == 120
                && let Some(enemy) = self.sim.behavior_mut::<EnemyBehavior>(self.enemy)
            {
                enemy.add_buff("Speed", 0.5);
            }

            self.sim.step();
            self.apply_gravity();
            self.report_events();

            if frame % 30 == 0 {
                self.log_positions();
            }
        }
    }

    fn log_positions(&self) {
        let world = &self.sim.context().world;
        let state = self
            .sim
            .behavior::<EnemyBehavior>(self.enemy)
            .map(EnemyBehavior::state);
        log::info!(
            "t={:.2}s player={:?} enemy={:?} state={state:?}",
            self.sim.context().time.elapsed(),
            world.position(self.player),
            world.position(self.enemy),
        );
    }

    fn summary(&self) {
        if let Some(enemy) = self.sim.behavior::<EnemyBehavior>(self.enemy) {
            let mut names = enemy.buff_names();
            names.sort();
            for name in names {
                log::info!("enemy buff {name} = {}", enemy.buff_value(&name));
            }
        }
        if let Ok(stats) = self.sim.context().world.get::<PlayerStats>(self.player) {
            log::info!("player stats: {:?}", *stats);
        }
    }
}

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::init();
    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => GameplayConfig::load(path)?,
        None => GameplayConfig::default(),
    };
    if let Some(seed) = args.seed {
        config.simulation.seed = seed;
    }

    let mut demo = Demo::new(&config);
    demo.run(args.ticks);
    demo.summary();

    Ok(())
}
