//! Tank level under proportional-integral feedback control.
//!
//! A tank of cross-section `area` receives an external inflow and drains
//! through a valve. The valve opening is set by a PI controller tracking
//! a setpoint level. Outflow across the valve follows
//! `opening * conductance * sqrt(density * gravity * level)`, i.e. flow
//! proportional to the square root of the hydrostatic pressure drop.
//!
//! # Update rule
//!
//! Each step reads only the previous record (one-step-delayed feedback):
//!
//! ```text
//! level[t]          = level[t-1] + delta_level[t-1]
//! error[t]          = level[t-1] - setpoint[t-1]
//! error_integral[t] = error_integral[t-1] + error[t-1] * dt
//! raw[t]            = Kc * (error[t] + error_integral[t] / tau_I)
//! valve_opening[t]  = clamp(raw[t], 0, 1)
//! outflow[t]        = valve_opening[t] * conductance * sqrt(density * gravity * level[t])
//! delta_level[t]    = (inflow[t] - outflow[t]) / area * dt
//! ```
//!
//! The clamp is a hard saturation with no anti-windup: the integral keeps
//! accumulating while the valve is pinned at 0 or 1.

use stepwise_core::{
    ConfigError, Recurrence, SimulationClock, StepContext, StepError, StepIndex,
};
use tracing::warn;

use crate::schedule::Schedule;

/// Tank geometry, fluid properties and valve.
#[derive(Clone, Debug, PartialEq)]
pub struct TankParams {
    /// Cross-sectional area (m²).
    pub area: f64,
    /// Total tank height (m). The model does not clamp the level to it.
    pub height: f64,
    /// Fluid density (kg/m³).
    pub density: f64,
    /// Gravitational acceleration (m/s²).
    pub gravity: f64,
    /// Valve conductance.
    pub valve_conductance: f64,
}

impl Default for TankParams {
    fn default() -> Self {
        Self {
            area: 10.0,
            height: 5.0,
            density: 1000.0,
            gravity: 10.0,
            valve_conductance: 0.04,
        }
    }
}

impl TankParams {
    /// Check that every parameter is finite and positive.
    pub fn validate(&self) -> Result<(), ConfigError> {
        ConfigError::check_positive("area", self.area)?;
        ConfigError::check_positive("height", self.height)?;
        ConfigError::check_positive("density", self.density)?;
        ConfigError::check_positive("gravity", self.gravity)?;
        ConfigError::check_positive("valve_conductance", self.valve_conductance)?;
        Ok(())
    }
}

/// Proportional-integral controller gains.
#[derive(Clone, Debug, PartialEq)]
pub struct PiGains {
    /// Proportional gain `Kc`.
    pub kc: f64,
    /// Integral reset time `tau_I` (s).
    pub tau_i: f64,
}

impl Default for PiGains {
    fn default() -> Self {
        Self {
            kc: 0.05,
            tau_i: 5.0,
        }
    }
}

impl PiGains {
    /// Check that both gains are finite and positive.
    pub fn validate(&self) -> Result<(), ConfigError> {
        ConfigError::check_positive("kc", self.kc)?;
        ConfigError::check_positive("tau_i", self.tau_i)?;
        Ok(())
    }

    /// Unclamped controller output `Kc * (error + integral / tau_I)`.
    pub fn output(&self, error: f64, error_integral: f64) -> f64 {
        self.kc * (error + error_integral / self.tau_i)
    }
}

/// Complete configuration of a tank run.
#[derive(Clone, Debug, PartialEq)]
pub struct TankConfig {
    /// Physical plant.
    pub tank: TankParams,
    /// Controller gains.
    pub gains: PiGains,
    /// Horizon (s).
    pub t_end: f64,
    /// Step size (s).
    pub dt: f64,
    /// Target level over time (m).
    pub setpoint: Schedule,
    /// Inflow over time (m³/s).
    pub inflow: Schedule,
}

impl Default for TankConfig {
    /// 500 s at 0.5 s steps; setpoint 1.5 m switching to 3 m at 200 s;
    /// constant inflow of 1 m³/s.
    fn default() -> Self {
        Self {
            tank: TankParams::default(),
            gains: PiGains::default(),
            t_end: 500.0,
            dt: 0.5,
            setpoint: Schedule::step_change(200.0, 1.5, 3.0),
            inflow: Schedule::constant(1.0),
        }
    }
}

impl TankConfig {
    /// Validate every parameter and return the run's clock.
    pub fn validate(&self) -> Result<SimulationClock, ConfigError> {
        self.tank.validate()?;
        self.gains.validate()?;
        self.setpoint.validate()?;
        self.inflow.validate()?;
        SimulationClock::from_horizon(self.t_end, self.dt)
    }
}

/// External inputs sampled at one step.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TankInputs {
    /// Time the inputs were sampled at.
    pub time: f64,
    /// Setpoint level.
    pub setpoint: f64,
    /// Inflow.
    pub inflow: f64,
}

/// Full tank and controller record for one step.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TankState {
    /// Simulation time.
    pub time: f64,
    /// Fluid level.
    pub level: f64,
    /// Setpoint in effect.
    pub setpoint: f64,
    /// Previous level minus previous setpoint.
    pub error: f64,
    /// Accumulated error, never reset by saturation.
    pub error_integral: f64,
    /// Controller output before clamping.
    pub raw_output: f64,
    /// Valve opening in `[0, 1]`.
    pub valve_opening: f64,
    /// Inflow.
    pub inflow: f64,
    /// Outflow across the valve.
    pub outflow: f64,
    /// Level change applied at the next step.
    pub delta_level: f64,
}

impl TankState {
    /// The step-0 record: empty tank, closed valve, zero error history.
    pub fn initial(inputs: &TankInputs) -> Self {
        Self {
            time: inputs.time,
            level: 0.0,
            setpoint: inputs.setpoint,
            error: 0.0,
            error_integral: 0.0,
            raw_output: 0.0,
            valve_opening: 0.0,
            inflow: inputs.inflow,
            outflow: 0.0,
            delta_level: 0.0,
        }
    }

    /// Whether the level is above the tank height.
    pub fn is_overflowing(&self, height: f64) -> bool {
        self.level > height
    }
}

/// Per-step snapshot for the renderer.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TankFrame {
    /// Simulation time.
    pub time: f64,
    /// Fluid level.
    pub level: f64,
    /// Setpoint in effect.
    pub setpoint: f64,
    /// Inflow.
    pub inflow: f64,
    /// Outflow.
    pub outflow: f64,
    /// Valve opening in `[0, 1]`.
    pub valve_opening: f64,
}

/// PI-controlled tank simulator.
#[derive(Clone, Debug)]
pub struct TankController {
    config: TankConfig,
    clock: SimulationClock,
}

impl TankController {
    /// Validate `config` and build the controller.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if any physical parameter or gain is not
    /// finite and positive, a schedule is malformed, or the horizon holds
    /// no step.
    pub fn new(config: TankConfig) -> Result<Self, ConfigError> {
        let clock = config.validate()?;
        Ok(Self { config, clock })
    }

    /// The configuration this controller was built from.
    pub fn config(&self) -> &TankConfig {
        &self.config
    }

    /// Sample the setpoint and inflow schedules at `time`.
    pub fn inputs_at(&self, time: f64) -> TankInputs {
        TankInputs {
            time,
            setpoint: self.config.setpoint.value_at(time),
            inflow: self.config.inflow.value_at(time),
        }
    }

    /// Apply the update rule once.
    ///
    /// `inputs` are the external signals at the step being computed;
    /// everything else comes from `prev`.
    ///
    /// # Errors
    ///
    /// Returns [`StepError::NumericDomain`] if the new level is negative
    /// or not a number, since the valve law takes its square root.
    pub fn advance(
        &self,
        prev: &TankState,
        inputs: &TankInputs,
        step: StepIndex,
    ) -> Result<TankState, StepError> {
        let tank = &self.config.tank;
        let dt = self.clock.dt();

        let level = prev.level + prev.delta_level;
        let error = prev.level - prev.setpoint;
        let error_integral = prev.error_integral + prev.error * dt;

        let raw_output = self.config.gains.output(error, error_integral);
        let valve_opening = raw_output.clamp(0.0, 1.0);

        let outflow = valve_opening * tank.valve_conductance * self.pressure_root(level, step)?;
        let delta_level = (inputs.inflow - outflow) / tank.area * dt;

        Ok(TankState {
            time: inputs.time,
            level,
            setpoint: inputs.setpoint,
            error,
            error_integral,
            raw_output,
            valve_opening,
            inflow: inputs.inflow,
            outflow,
            delta_level,
        })
    }

    /// `sqrt(density * gravity * level)`, rejecting a negative level.
    fn pressure_root(&self, level: f64, step: StepIndex) -> Result<f64, StepError> {
        if level.is_nan() || level < 0.0 {
            return Err(StepError::NumericDomain {
                quantity: "level",
                value: level,
                step,
            });
        }
        Ok((self.config.tank.density * self.config.tank.gravity * level).sqrt())
    }
}

impl Recurrence for TankController {
    type State = TankState;
    type Frame = TankFrame;

    fn name(&self) -> &str {
        "tank_level_pi"
    }

    fn clock(&self) -> SimulationClock {
        self.clock
    }

    fn initial(&self, ctx: &mut StepContext<'_>) -> Result<TankState, StepError> {
        Ok(TankState::initial(&self.inputs_at(ctx.time())))
    }

    fn step(&self, prev: &TankState, ctx: &mut StepContext<'_>) -> Result<TankState, StepError> {
        let inputs = self.inputs_at(ctx.time());
        let next = self.advance(prev, &inputs, ctx.step())?;

        let height = self.config.tank.height;
        if next.is_overflowing(height) && !prev.is_overflowing(height) {
            warn!(
                step = ctx.step().0,
                level = next.level,
                height,
                "tank level rose above tank height"
            );
        }
        Ok(next)
    }

    fn frame(&self, _step: StepIndex, _time: f64, state: &TankState) -> TankFrame {
        TankFrame {
            time: state.time,
            level: state.level,
            setpoint: state.setpoint,
            inflow: state.inflow,
            outflow: state.outflow,
            valve_opening: state.valve_opening,
        }
    }
}
