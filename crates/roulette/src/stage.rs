use crate::config::{Config, ConfigChanges};
use wheelkit::{Variant, Wheel, WheelError};

/// The mounted wheel and the configuration it was built from. The GTK side
/// shares one of these between the draw func, the tick callback and the
/// component.
pub struct Stage {
    pub wheel: Wheel,
    pub config: Config,
    /// Bumped on every asset load so results meant for an unmounted wheel
    /// are dropped.
    generation: u64,
}

impl Stage {
    pub fn new(config: Config) -> Self {
        let wheel = Wheel::new(config.wheel.variant, config.wheel.options());
        Self {
            wheel,
            config,
            generation: 0,
        }
    }

    /// Tears down the mounted wheel and builds `variant` in its place.
    /// Returns false, leaving everything as is, when `variant` is already
    /// mounted.
    pub fn mount(&mut self, variant: Variant) -> bool {
        if self.wheel.variant() == variant {
            log::debug!("{} wheel is already mounted", variant);
            return false;
        }
        self.wheel.destroy();
        self.wheel = Wheel::new(variant, self.config.wheel.options());
        log::info!("Mounted the {} wheel", variant);
        true
    }

    pub fn begin_load(&mut self) -> u64 {
        self.generation += 1;
        self.generation
    }

    /// Marks the wheel ready if the finished load is the latest one.
    pub fn finish_load(&mut self, generation: u64) -> bool {
        if generation != self.generation {
            log::debug!("Dropping assets from an earlier load");
            return false;
        }
        self.wheel.mark_ready();
        true
    }

    /// Applies a reloaded configuration to the mounted wheel. Returns whether
    /// assets have to be loaded again.
    pub fn apply_config(&mut self, config: Config) -> bool {
        let changes = ConfigChanges::between(&self.config, &config);
        self.config = config;

        let remounted = changes.variant.is_some_and(|variant| self.mount(variant));
        if !remounted {
            if let Some(duration) = changes.duration {
                self.wheel.set_default_duration(duration);
            }
            if let Some(enabled) = changes.live_labels {
                match self.wheel.enable_dynamic_text_during_rotation(enabled) {
                    Ok(()) | Err(WheelError::NotExtended) => {}
                    Err(e) => log::warn!("Cannot toggle live labels: {}", e),
                }
            }
        }

        remounted || changes.assets
    }
}
