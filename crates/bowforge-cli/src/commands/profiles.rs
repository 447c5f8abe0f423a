use crate::error::Result;
use bowforge::core::models::print::PrintSettings;
use bowforge::core::models::profile::UserClass;

pub fn run() -> Result<()> {
    println!(
        "{:<14}{:>10}{:>10}{:>10}{:>8}{:>8}{:>10}{:>10}{:>10}",
        "Profile", "Thick.", "Curv.", "Stiff.", "Grip", "Tip", "Max F", "Max v", "Layer"
    );
    for class in UserClass::ALL {
        let p = class.profile();
        let print = PrintSettings::for_class(class);
        println!(
            "{:<14}{:>10.2}{:>10.2}{:>10.2}{:>8.1}{:>8.1}{:>10.1}{:>10.1}{:>10.2}",
            class.as_str(),
            p.bow_thickness,
            p.bow_curvature,
            p.limb_stiffness,
            p.grip_width,
            p.tip_diameter,
            p.max_draw_force,
            p.max_launch_speed,
            print.layer_height_mm,
        );
    }
    Ok(())
}
