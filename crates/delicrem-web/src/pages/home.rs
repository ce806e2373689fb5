//! Welcome page

use leptos::prelude::*;

/// Home page component
#[component]
pub fn Home() -> impl IntoView {
    view! {
        <div class="home">
            <div class="home-text">
                <h1>"Bienvenidos a Delicrem"</h1>
                <p>
                    "Delicrem es una empresa familiar que se dedica a la elaboración de productos "
                    "lácteos de alta calidad. Fundada hace más de 50 años, hemos logrado consolidarnos "
                    "como una de las marcas más reconocidas en el mercado gracias a nuestro compromiso "
                    "con la excelencia y la innovación."
                </p>
                <p>
                    "Nuestro equipo está conformado por un grupo de expertos en la industria láctea, "
                    "quienes se encargan de seleccionar cuidadosamente los mejores insumos y aplicar "
                    "técnicas de producción artesanales para garantizar la frescura y el sabor único "
                    "de nuestros productos."
                </p>
            </div>
        </div>
    }
}
