use std::ops::{Mul, Div, Add};


pub trait Integrate{

    fn effects(&mut self){()}

    fn get_derivative(&self)-> Self;

    fn rk4(&mut self, dt: f64) -> Self
        where Self:
            Sized +
            Clone +
            Add<Self, Output = Self> +
            Mul<f64, Output = Self> +
            Div<f64, Output = Self>,
    {
        self.effects();

        let k1 = self.get_derivative();
        let k2 = (self.clone() + (k1.clone() * dt / 2.0)).get_derivative();
        let k3 = (self.clone() + (k2.clone() * dt / 2.0)).get_derivative();
        let k4 = (self.clone() + k3.clone() * dt).get_derivative();

        return self.clone() + ((k1 + (k2 * 2.0) + (k3 * 2.0) + k4) * dt / 6.0)
    }

    fn euler(&mut self, dt: f64)-> Self
        where
            Self:
                Sized +
                Clone +
                Add<Self, Output = Self> +
                Mul<f64, Output = Self>
    {
        self.effects();

        let euler =  self.clone() + (self.get_derivative() * dt);
        return euler
    }
}
