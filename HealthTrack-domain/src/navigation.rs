//! Navigation contract between the screen controllers and the host router

use std::fmt;
use std::str::FromStr;

/// Named destinations the screens can reach
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Route {
    /// Landing screen of the host shell
    Home,
    /// Blood pressure readings (destination after a save)
    PressureReadings,
    /// Blood pressure entry form
    AddPressure,
    /// Blood sugar readings view
    SugarReadings,
    /// Blood sugar entry screen
    AddSugar,
}

impl Route {
    /// Route name as registered with the router
    pub fn name(&self) -> &'static str {
        match self {
            Route::Home => "home",
            Route::PressureReadings => "pressure",
            Route::AddPressure => "addpressure",
            Route::SugarReadings => "sugar",
            Route::AddSugar => "addsugar",
        }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Route {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "home" => Ok(Route::Home),
            "pressure" => Ok(Route::PressureReadings),
            "addpressure" => Ok(Route::AddPressure),
            "sugar" => Ok(Route::SugarReadings),
            "addsugar" => Ok(Route::AddSugar),
            other => Err(format!("Unknown route: {}", other)),
        }
    }
}

/// Navigation actions a screen may trigger
#[cfg_attr(test, mockall::automock)]
pub trait Navigator: Send + Sync {
    /// Leave the current screen
    fn go_back(&self);

    /// Open `route`, optionally carrying a one-time message
    fn navigate(&self, route: Route, message: Option<String>);
}
