use crate::four_momentum::FourMomentum;

/// Anything carrying a four-momentum
///
/// Implementors with stored kinematics (e.g. detector objects that
/// come with a measured pseudorapidity) override the derived getters.
pub trait Momentum {
    fn momentum(&self) -> FourMomentum;

    fn pt(&self) -> f64 {
        self.momentum().pt()
    }

    fn eta(&self) -> f64 {
        self.momentum().eta()
    }

    fn phi(&self) -> f64 {
        self.momentum().phi()
    }
}

impl Momentum for FourMomentum {
    fn momentum(&self) -> FourMomentum {
        *self
    }
}

impl<T: Momentum + ?Sized> Momentum for &T {
    fn momentum(&self) -> FourMomentum {
        (**self).momentum()
    }

    fn pt(&self) -> f64 {
        (**self).pt()
    }

    fn eta(&self) -> f64 {
        (**self).eta()
    }

    fn phi(&self) -> f64 {
        (**self).phi()
    }
}

/// Human-readable one-line description, `Name {field=value,...}`
pub trait Show {
    fn show(&self) -> String;
}

impl Show for FourMomentum {
    fn show(&self) -> String {
        FourMomentum::show(self)
    }
}

impl<T: Show> Show for [T] {
    fn show(&self) -> String {
        use itertools::Itertools;
        format!("[{}]", self.iter().map(Show::show).join(","))
    }
}
