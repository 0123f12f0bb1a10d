type DynError = Box<dyn std::error::Error + Send + Sync>;

/// Absolute position sensor. Returns `[x, y, z]` in simulation units; the
/// control plane uses the first two components.
pub trait Gps {
    fn position(&mut self) -> Result<[f64; 3], DynError>;
}

/// Three-axis compass. Returns the north vector in the robot frame.
pub trait Compass {
    fn north(&mut self) -> Result<[f64; 3], DynError>;
}

/// Single-beam distance sensor (one sonar transducer).
pub trait DistanceSensor {
    fn distance(&mut self) -> Result<f64, DynError>;
}

impl<T: Gps + ?Sized> Gps for Box<T> {
    fn position(&mut self) -> Result<[f64; 3], DynError> {
        (**self).position()
    }
}

impl<T: Compass + ?Sized> Compass for Box<T> {
    fn north(&mut self) -> Result<[f64; 3], DynError> {
        (**self).north()
    }
}

impl<T: DistanceSensor + ?Sized> DistanceSensor for Box<T> {
    fn distance(&mut self) -> Result<f64, DynError> {
        (**self).distance()
    }
}
